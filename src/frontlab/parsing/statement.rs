//! Bounded `for` statement grammar
//!
//! ```text
//! For      → for <id> := Operand to Operand do Stmt ;
//! Stmt     → <id> Assign ArithExpr
//! Assign   → =
//! ArithExpr→ Operand (Plus | Minus)*
//! Plus     → + Operand
//! Minus    → - Operand
//! Operand  → <id> | <number>
//! ```
//!
//! Recovery is accumulate-and-continue. A missing token is first explained by a
//! single-token repair (see [Repair]); when that fails the parser advances anyway and
//! synchronizes: a missing `for` resumes at the next `for`, a missing `do` gives up on
//! the loop body. The trailing `;` is checked once the statement rule is done.

use super::state::{ParserState, Repair};
use crate::frontlab::analysis::{AnalysisOptions, SyntaxReport};
use crate::frontlab::diagnostics::DiagnosticKind;
use crate::frontlab::grammar::Grammar;
use crate::frontlab::token::TokenKind;

const OPERAND: [TokenKind; 2] = [TokenKind::Identifier, TokenKind::Number];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    /// The statement was parsed to its end; the terminator check applies.
    Complete,
    /// The rest of the input was discarded after a reported fault.
    Abandoned,
}

/// Validate a `for` statement, producing diagnostics and a trace.
pub fn parse_statement(source: &str, options: &AnalysisOptions) -> SyntaxReport {
    let mut state = ParserState::new(source, Grammar::Statement, options.record_tokens);
    if !options.trace {
        state.trace.disable();
    }

    if parse_for(&mut state) == Completion::Complete {
        check_terminator(&mut state);
    }

    let (diagnostics, trace) = state.finish(options.summary);
    SyntaxReport { diagnostics, trace }
}

/// Match `kind` or report it, repairing locally when possible.
///
/// Returns `false` when the fault could not be explained; the offending token has then
/// been skipped and the caller decides where to resume.
fn match_or_error(
    state: &mut ParserState<'_>,
    kind: TokenKind,
    label: &str,
    follow: &[TokenKind],
) -> bool {
    state.skip_unknown_run();
    if state.at(kind) {
        state.consume(label);
        return true;
    }

    match state.repair(kind, label, follow) {
        Repair::Deleted | Repair::Replaced | Repair::Missing => true,
        Repair::Unexplained => {
            state.advance();
            false
        }
    }
}

fn parse_for(state: &mut ParserState<'_>) -> Completion {
    state.rule("For", |state| {
        if state.skip_unknown_run() && state.at_end() {
            return Completion::Abandoned;
        }

        // Without `for`, only an `<id> :=` header right ahead shows that a loop was meant.
        let header_ahead =
            state.lookahead(1).is(TokenKind::Assign) || state.lookahead(2).is(TokenKind::Assign);
        let follow: &[TokenKind] = if header_ahead {
            &[TokenKind::Identifier]
        } else {
            &[]
        };
        if !match_or_error(state, TokenKind::For, "for", follow) {
            state.synchronize(&[TokenKind::For]);
            if !state.at(TokenKind::For) {
                return Completion::Abandoned;
            }
            state.consume("for");
        }

        match_or_error(state, TokenKind::Identifier, "var", &[TokenKind::Assign]);
        match_or_error(state, TokenKind::Assign, ":=", &OPERAND);
        parse_operand(state, &[TokenKind::To]);
        match_or_error(state, TokenKind::To, "to", &OPERAND);
        parse_operand(state, &[TokenKind::Do]);

        if !match_or_error(state, TokenKind::Do, "do", &[TokenKind::Identifier]) {
            state.synchronize(&[]);
            return Completion::Abandoned;
        }

        parse_stmt(state);
        parse_tail(state)
    })
}

/// Everything between the end of the loop body and end of input.
fn parse_tail(state: &mut ParserState<'_>) -> Completion {
    state.skip_unknown_run();
    if !state.at(TokenKind::Semicolon) && !state.at_end() {
        let message = format!("Unexpected {}", state.current().describe());
        state.error(DiagnosticKind::Syntactic, message);
        state.synchronize(&[TokenKind::Semicolon]);
    }

    if state.at(TokenKind::Semicolon) {
        state.consume(";");
    }

    state.skip_unknown_run();
    if state.at_end() {
        return Completion::Complete;
    }

    let message = format!(
        "Unexpected {} after the end of the statement",
        state.current().describe()
    );
    state.error(DiagnosticKind::Syntactic, message);
    state.synchronize(&[]);
    Completion::Abandoned
}

fn parse_operand(state: &mut ParserState<'_>, follow: &[TokenKind]) {
    state.rule("Operand", |state| {
        state.skip_unknown_run();
        match state.current().kind {
            TokenKind::Identifier => state.consume("var"),
            TokenKind::Number => state.consume("const"),
            _ => {
                state.expected("operand (variable or number)");
                // A token that belongs to what follows means the operand is missing.
                if !state.at_any(follow) {
                    state.advance();
                }
            }
        }
    })
}

fn parse_stmt(state: &mut ParserState<'_>) {
    state.rule("Stmt", |state| {
        match_or_error(state, TokenKind::Identifier, "var", &[TokenKind::Equal]);
        state.rule("Assign", |state| {
            match_or_error(state, TokenKind::Equal, "=", &OPERAND);
        });
        parse_arith_expr(state);
    })
}

fn parse_arith_expr(state: &mut ParserState<'_>) {
    const ADDITIVE: [TokenKind; 3] = [TokenKind::Plus, TokenKind::Minus, TokenKind::Semicolon];

    state.rule("ArithExpr", |state| {
        parse_operand(state, &ADDITIVE);

        loop {
            // An invalid operator between two operands (`1 * 2`) is reported once and
            // the expression goes on.
            let skipped = state.skip_unknown_run();
            match state.current().kind {
                TokenKind::Plus => state.rule("Plus", |state| {
                    state.consume("+");
                    parse_operand(state, &ADDITIVE);
                }),
                TokenKind::Minus => state.rule("Minus", |state| {
                    state.consume("-");
                    parse_operand(state, &ADDITIVE);
                }),
                TokenKind::Identifier | TokenKind::Number if skipped => {
                    parse_operand(state, &ADDITIVE);
                }
                _ => break,
            }
        }
    })
}

/// The last token before end of input must be the terminating `;`. Trailing invalid
/// characters are already reported on their own and do not count.
fn check_terminator(state: &mut ParserState<'_>) {
    let last = state
        .tokens()
        .iter()
        .rev()
        .find(|token| !token.is_any(&[TokenKind::EndOfInput, TokenKind::Unknown]));
    let missing = matches!(last, Some(token) if !token.is(TokenKind::Semicolon));
    if missing {
        state.error(
            DiagnosticKind::Structural,
            "Expected ';' at the end of the statement",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SyntaxReport {
        parse_statement(source, &AnalysisOptions::default())
    }

    fn messages(report: &SyntaxReport) -> Vec<&str> {
        report
            .diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect()
    }

    #[test]
    fn test_valid_statement() {
        let report = parse("for i:=1 to 10 do x=1+2;");
        assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_valid_statement_over_several_lines() {
        let report = parse("for i := a to b\ndo\n  x = x - 1 + y;\n");
        assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_missing_do() {
        let report = parse("for i:=1 to 10 x=1+2;");
        assert_eq!(messages(&report), vec!["Expected 'do', found 'x'"]);
    }

    #[test]
    fn test_misspelled_do() {
        let report = parse("for i:=1 to 10 od x=1+2;");
        assert_eq!(messages(&report), vec!["Expected 'do', found 'od'"]);
    }

    #[test]
    fn test_missing_assign() {
        let report = parse("for i 1 to 10 do x=1;");
        assert_eq!(messages(&report), vec!["Expected ':=', found '1'"]);
    }

    #[test]
    fn test_equal_instead_of_assign() {
        let report = parse("for i = 1 to 10 do x=1;");
        assert_eq!(messages(&report), vec!["Expected ':=', found '='"]);
    }

    #[test]
    fn test_missing_operand() {
        let report = parse("for i:= to 10 do x=1;");
        assert_eq!(
            messages(&report),
            vec!["Expected operand (variable or number), found 'to'"]
        );
    }

    #[test]
    fn test_missing_semicolon() {
        let report = parse("for i:=1 to 10 do x=1+2");
        assert_eq!(messages(&report), vec!["Expected ';' at the end of the statement"]);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Structural);
        assert_eq!(report.diagnostics[0].position, 23);
    }

    #[test]
    fn test_missing_for_resumes_at_next_for() {
        let report = parse("1 2 for i:=1 to 10 do x=1;");
        assert_eq!(messages(&report), vec!["Expected 'for', found '1'"]);
    }

    #[test]
    fn test_misspelled_for() {
        let report = parse("fro i:=1 to 10 do x=1;");
        assert_eq!(messages(&report), vec!["Expected 'for', found 'fro'"]);
    }

    #[test]
    fn test_garbage_without_for_is_one_diagnostic() {
        let report = parse("hello 42");
        assert_eq!(messages(&report), vec!["Expected 'for', found 'hello'"]);
    }

    #[test]
    fn test_identifier_before_assign_is_a_missing_for() {
        let report = parse("i:=1 to 10 do x=1;");
        assert_eq!(messages(&report), vec!["Expected 'for', found 'i'"]);
        let texts: Vec<_> = report.trace.iter().map(|e| e.text.as_str()).collect();
        assert!(texts.contains(&"Token: var = i"));
    }

    #[test]
    fn test_words_without_header_are_skipped() {
        let report = parse("hello world 42 x");
        assert_eq!(messages(&report), vec!["Expected 'for', found 'hello'"]);
        assert!(!report.trace.iter().any(|e| e.text == "Token: var = hello"));
    }

    #[test]
    fn test_empty_input() {
        let report = parse("");
        assert_eq!(messages(&report), vec!["Expected 'for', found end of input"]);
    }

    #[test]
    fn test_truncated_input_reports_once_at_end() {
        let report = parse("for i:=1 to");
        assert_eq!(
            messages(&report),
            vec!["Expected operand (variable or number), found end of input"]
        );
    }

    #[test]
    fn test_invalid_operator_is_one_lexical_diagnostic() {
        let report = parse("for i:=1 to 10 do x=1*2;");
        assert_eq!(messages(&report), vec!["Invalid character(s) '*'"]);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Lexical);
    }

    #[test]
    fn test_unknown_run_is_reported_once() {
        let report = parse("for i:=1 to 10 do x=1+@@@2;");
        assert_eq!(messages(&report), vec!["Invalid character(s) '@@@'"]);
        assert_eq!(report.diagnostics[0].length, 3);
    }

    #[test]
    fn test_only_unknown_characters() {
        let report = parse("@@@");
        assert_eq!(messages(&report), vec!["Invalid character(s) '@@@'"]);
    }

    #[test]
    fn test_trailing_invalid_characters_do_not_hide_the_terminator() {
        let report = parse("for i:=1 to 10 do x=1;@");
        assert_eq!(messages(&report), vec!["Invalid character(s) '@'"]);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Lexical);
    }

    #[test]
    fn test_trailing_invalid_characters_without_terminator() {
        let report = parse("for i:=1 to 10 do x=1 @");
        assert_eq!(
            messages(&report),
            vec![
                "Invalid character(s) '@'",
                "Expected ';' at the end of the statement",
            ]
        );
    }

    #[test]
    fn test_extra_operand_before_semicolon() {
        let report = parse("for i:=1 to 10 do x=1 2;");
        assert_eq!(messages(&report), vec!["Unexpected '2'"]);
    }

    #[test]
    fn test_text_after_statement() {
        let report = parse("for i:=1 to 10 do x=1; y");
        assert_eq!(
            messages(&report),
            vec!["Unexpected 'y' after the end of the statement"]
        );
    }

    #[test]
    fn test_unexplained_do_abandons_the_body() {
        let report = parse("for i:=1 to 10 ; 5");
        assert_eq!(messages(&report), vec!["Expected 'do', found ';'"]);
    }

    #[test]
    fn test_independent_errors_in_one_pass() {
        let report = parse("for i 1 to 10 x=1+2");
        assert_eq!(
            messages(&report),
            vec![
                "Expected ':=', found '1'",
                "Expected 'do', found 'x'",
                "Expected ';' at the end of the statement",
            ]
        );
    }

    #[test]
    fn test_diagnostic_line_and_column() {
        let report = parse("for i:=1 to 10\n  x=1;");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].line, 2);
        assert_eq!(report.diagnostics[0].column, 3);
    }

    #[test]
    fn test_trace_shape() {
        let report = parse("for i:=1 to 2 do x=y;");
        let texts: Vec<_> = report.trace.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts[0], "Enter <For>");
        assert_eq!(texts[1], "Token: for");
        assert_eq!(texts[2], "Token: var = i");
        assert!(texts.contains(&"Enter <ArithExpr>"));
        assert_eq!(
            texts.last().copied(),
            Some("Analysis completed successfully. No errors found.")
        );
    }
}
