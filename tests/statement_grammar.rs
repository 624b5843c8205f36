//! Bounded `for` statement validation
//!
//! One malformed construct must produce exactly one diagnostic naming that construct,
//! and every analysis must run to end of input.

use frontlab::frontlab::diagnostics::DiagnosticKind;
use frontlab::frontlab::testing::{assert_diagnostics, assert_trace, TextMatch};
use frontlab::frontlab::trace::render_trace;
use frontlab::{analyze_statement, AnalysisOptions, SyntaxReport};
use rstest::rstest;

fn parse(source: &str) -> SyntaxReport {
    analyze_statement(source, &AnalysisOptions::default())
}

#[rstest(
    source => [
        "for i:=1 to 10 do x=1+2;",
        "for i := n to m do s = s + i;",
        "for idx:=0 to 99 do total=total-idx+1-2;",
        "for i:=1 to 10 do x=y;",
        "for\ti\n:=\n1\nto\n10\ndo\nx\n=\n1\n;\n",
        "for i_2:=a1 to b_ do c=d;",
    ]
)]
fn test_well_formed_statements_have_no_diagnostics(source: &str) {
    let report = parse(source);
    assert_diagnostics(&report.diagnostics).none();
    assert_trace(&report.trace)
        .balanced()
        .last(TextMatch::Exact(
            "Analysis completed successfully. No errors found.".to_string(),
        ));
}

#[rstest]
#[case("for i:=1 to 10 x=1+2;", "Expected 'do', found 'x'")]
#[case("for i:=1 to 10 od x=1+2;", "Expected 'do', found 'od'")]
#[case("for i:=1 10 do x=1;", "Expected 'to', found '10'")]
#[case("for i 1 to 10 do x=1;", "Expected ':=', found '1'")]
#[case("for i:=1 too 10 do x=1;", "Expected 'to', found 'too'")]
#[case("for := 1 to 10 do x=1;", "Expected identifier, found ':='")]
#[case("for i:=1 to 10 do x 1;", "Expected '=', found '1'")]
#[case("for i:=1 to 10 do x=;", "Expected operand (variable or number), found ';'")]
#[case("for i:=1 to 10 do x=1+;", "Expected operand (variable or number), found ';'")]
#[case("for i:=1 to 10 do x=1+2", "Expected ';' at the end of the statement")]
#[case("i:=1 to 10 do x=1;", "Expected 'for', found 'i'")]
fn test_single_fault_gives_single_diagnostic(#[case] source: &str, #[case] message: &str) {
    let report = parse(source);
    assert_diagnostics(&report.diagnostics)
        .count(1)
        .diagnostic(0, |d| {
            d.message(message);
        });
    assert_trace(&report.trace).balanced();
}

#[test]
fn test_invalid_characters_are_grouped_per_run() {
    let report = parse("for i:=1 to 10 do x=1+#$2;");
    assert_diagnostics(&report.diagnostics)
        .count(1)
        .diagnostic(0, |d| {
            d.kind(DiagnosticKind::Lexical)
                .message("Invalid character(s) '#$'")
                .position(22)
                .length(2)
                .at(1, 23);
        });
}

#[test]
fn test_cyrillic_identifier_is_one_lexical_fault() {
    let report = parse("for i:=1 to 10 do x=1+жук;");
    assert_diagnostics(&report.diagnostics)
        .count(2)
        .diagnostic(0, |d| {
            d.kind(DiagnosticKind::Lexical)
                .message("Invalid character(s) 'жук'")
                .length(3)
                .at(1, 23);
        });
}

#[test]
fn test_only_invalid_characters() {
    let report = parse("@@@");
    assert_diagnostics(&report.diagnostics)
        .count(1)
        .diagnostic(0, |d| {
            d.kind(DiagnosticKind::Lexical).length(3).at(1, 1);
        });
}

#[test]
fn test_several_independent_faults() {
    let report = parse("for i 1 to 10 x=1*2");
    assert_diagnostics(&report.diagnostics).messages(&[
        "Expected ':=', found '1'",
        "Expected 'do', found 'x'",
        "Invalid character(s) '*'",
        "Expected ';' at the end of the statement",
    ]);
}

#[test]
fn test_multiline_positions() {
    let report = parse("for i:=1\nto 10\ndo x=1\n+ 2");
    assert_diagnostics(&report.diagnostics)
        .count(1)
        .diagnostic(0, |d| {
            d.kind(DiagnosticKind::Structural).at(4, 4).position(25);
        });
}

#[test]
fn test_trace_shows_replaced_token() {
    let report = parse("for i:=1 to 10 od x=1;");
    assert_trace(&report.trace)
        .balanced()
        .contains(TextMatch::Exact("Token: do (replaced 'od')".to_string()))
        .last(TextMatch::Exact("Analysis completed with 1 error(s).".to_string()));
}

#[test]
fn test_valid_statement_trace() {
    let report = parse("for i:=1 to 10 do x=1+2;");
    let trace = render_trace(&report.trace, 2);
    insta::assert_snapshot!("valid_statement_trace", trace);
}
