//! Record type declaration validation
//!
//! Missing mandatory tokens are repaired by inserting synthetic tokens, so each fault
//! is reported once and the rest of the declaration is still checked.

use frontlab::frontlab::diagnostics::DiagnosticKind;
use frontlab::frontlab::testing::{assert_diagnostics, assert_trace, TextMatch};
use frontlab::{analyze_record, validate_record, AnalysisOptions};
use rstest::rstest;

#[rstest(
    source => [
        "type Point = record x, y: real; end;",
        "type Person = record name: string; age: integer; alive: boolean; end;",
        "type Empty = record end;",
        "type  Cell\n= record\n  value : char ;\nend\n;",
        "type R = record a, b, c, d: integer; e: real; end;",
    ]
)]
fn test_well_formed_declarations(source: &str) {
    assert_diagnostics(&validate_record(source)).none();
}

#[rstest]
#[case("Point = record x: real; end;", "Expected 'type', found 'Point'")]
#[case("type = record x: real; end;", "Expected identifier, found '='")]
#[case("type Point record x: real; end;", "Expected '=', found 'record'")]
#[case("type Point = x: real; end;", "Expected 'record', found 'x'")]
#[case("type Point = record x real; end;", "Expected ':', found 'real'")]
#[case("type Point = record x: ; end;", "Expected type name, found ';'")]
#[case("type Point = record x: float; end;", "Unknown type 'float'")]
#[case("type Point = record x: real end;", "Expected ';', found 'end'")]
#[case("type Point = record x: real;", "Expected 'end', found end of input")]
#[case("type Point = record x: real; end", "Expected ';', found end of input")]
#[case("type Point = record x, : real; end;", "Expected field name, found ':'")]
fn test_single_fault_gives_single_diagnostic(#[case] source: &str, #[case] message: &str) {
    assert_diagnostics(&validate_record(source))
        .count(1)
        .diagnostic(0, |d| {
            d.message(message);
        });
}

#[test]
fn test_closing_tokens_are_structural() {
    assert_diagnostics(&validate_record("type P = record x: real end;"))
        .diagnostic(0, |d| {
            d.kind(DiagnosticKind::Structural).at(1, 25);
        });
}

#[test]
fn test_every_independent_fault_is_reported() {
    let diagnostics = validate_record("type P record a integer; b: text; end");
    assert_diagnostics(&diagnostics).messages(&[
        "Expected '=', found 'record'",
        "Expected ':', found 'integer'",
        "Unknown type 'text'",
        "Expected ';', found end of input",
    ]);
}

#[test]
fn test_inserted_tokens_show_in_trace() {
    let report = analyze_record("type P record a: integer end;", &AnalysisOptions::default());
    assert_trace(&report.trace)
        .balanced()
        .contains(TextMatch::Exact("Token: = (inserted)".to_string()))
        .contains(TextMatch::Exact("Token: ; (inserted)".to_string()))
        .last(TextMatch::Exact("Analysis completed with 2 error(s).".to_string()));
}

#[test]
fn test_invalid_characters() {
    assert_diagnostics(&validate_record("type P = record x: real; #! end;"))
        .count(1)
        .diagnostic(0, |d| {
            d.kind(DiagnosticKind::Lexical)
                .message("Invalid character(s) '#!'")
                .length(2);
        });
}

#[test]
fn test_assign_operator_is_not_record_vocabulary() {
    assert_diagnostics(&validate_record("type P := record end;"))
        .count(1)
        .diagnostic(0, |d| {
            d.kind(DiagnosticKind::Lexical).message("Invalid character(s) ':'");
        });
}

#[test]
fn test_stray_tokens_in_field_list() {
    assert_diagnostics(&validate_record("type P = record x: real; 42 = y: char; end;"))
        .count(1)
        .diagnostic(0, |d| {
            d.message("Unexpected '42' in field list");
        });
}

#[test]
fn test_empty_input() {
    assert_diagnostics(&validate_record("  \n "))
        .count(1)
        .diagnostic(0, |d| {
            d.kind(DiagnosticKind::Structural)
                .message("Expected a record type declaration, found end of input");
        });
}

#[test]
fn test_validation_is_idempotent() {
    let source = "type P = record a b: float x; end";
    assert_eq!(validate_record(source), validate_record(source));
}
