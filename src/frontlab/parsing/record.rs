//! Record type declaration grammar
//!
//! ```text
//! Declaration    → type <id> = record FieldList end ;
//! FieldList      → Field*
//! Field          → IdentifierList : TypeName ;
//! IdentifierList → <id> (, <id>)*
//! TypeName       → integer | real | char | boolean | string
//! ```
//!
//! A missing mandatory token is repaired by inserting a synthetic token into the token
//! sequence right where it belongs, after which parsing continues as if the source had
//! contained it. Each fault therefore costs one diagnostic and does not cascade into
//! the rest of the declaration.

use super::state::{ParserState, Repair};
use crate::frontlab::analysis::{AnalysisOptions, SyntaxReport};
use crate::frontlab::diagnostics::DiagnosticKind;
use crate::frontlab::grammar::Grammar;
use crate::frontlab::token::TokenKind;

const TYPE_FOLLOW: [TokenKind; 6] = [
    TokenKind::Integer,
    TokenKind::Real,
    TokenKind::Char,
    TokenKind::Boolean,
    TokenKind::StringType,
    TokenKind::Identifier,
];

/// Validate a record type declaration, producing diagnostics and a trace.
pub fn parse_record(source: &str, options: &AnalysisOptions) -> SyntaxReport {
    let mut state = ParserState::new(source, Grammar::Record, options.record_tokens);
    if !options.trace {
        state.trace.disable();
    }
    parse_declaration(&mut state);
    let (diagnostics, trace) = state.finish(options.summary);
    SyntaxReport { diagnostics, trace }
}

/// Match `kind`, or repair its absence, inserting a synthetic token when the source
/// offers nothing to stand in for it.
fn expect_or_insert(
    state: &mut ParserState<'_>,
    kind: TokenKind,
    label: &str,
    follow: &[TokenKind],
) {
    state.skip_unknown_run();
    if state.at(kind) {
        state.consume(label);
        return;
    }

    match state.repair(kind, label, follow) {
        Repair::Deleted | Repair::Replaced => {}
        Repair::Missing | Repair::Unexplained => {
            state.insert_synthetic(kind);
            state.consume(label);
        }
    }
}

/// A closing token: `;` after a field, `end`, and the final `;`.
///
/// A stray token in front of the closer is skipped, unless it is one of `anchors`,
/// the tokens the declaration still needs; then the closer is inserted before it.
fn close(state: &mut ParserState<'_>, kind: TokenKind, label: &str, anchors: &[TokenKind]) {
    state.skip_unknown_run();
    if state.at(kind) {
        state.consume(label);
        return;
    }

    let message = format!(
        "Expected {}, found {}",
        kind.describe(),
        state.current().describe()
    );
    state.error(DiagnosticKind::Structural, message);

    if !state.at_end() && !state.at_any(anchors) && state.lookahead(1).is(kind) {
        state.advance();
    } else {
        state.insert_synthetic(kind);
    }
    state.consume(label);
}

fn parse_declaration(state: &mut ParserState<'_>) {
    state.rule("Declaration", |state| {
        let skipped = state.skip_unknown_run();
        if state.at_end() {
            if !skipped {
                state.error(
                    DiagnosticKind::Structural,
                    "Expected a record type declaration, found end of input",
                );
            }
            return;
        }

        expect_or_insert(state, TokenKind::Type, "type", &[TokenKind::Identifier]);
        expect_or_insert(state, TokenKind::Identifier, "name", &[TokenKind::Equal]);
        expect_or_insert(state, TokenKind::Equal, "=", &[TokenKind::Record]);
        expect_or_insert(
            state,
            TokenKind::Record,
            "record",
            &[TokenKind::Identifier, TokenKind::End],
        );
        parse_field_list(state);
        close(state, TokenKind::End, "end", &[]);
        close(state, TokenKind::Semicolon, ";", &[]);

        state.skip_unknown_run();
        if !state.at_end() {
            let message = format!(
                "Unexpected {} after the end of the declaration",
                state.current().describe()
            );
            state.error(DiagnosticKind::Syntactic, message);
            state.synchronize(&[]);
        }
    })
}

fn parse_field_list(state: &mut ParserState<'_>) {
    state.rule("FieldList", |state| loop {
        let kind = state.current().kind;
        match kind {
            TokenKind::Identifier | TokenKind::Comma | TokenKind::Colon => parse_field(state),
            _ if kind.is_type_keyword() => parse_field(state),
            TokenKind::End | TokenKind::EndOfInput => break,
            TokenKind::Unknown => {
                state.skip_unknown_run();
            }
            TokenKind::Semicolon => {
                state.error(DiagnosticKind::Syntactic, "Empty field declaration");
                state.advance();
            }
            _ => {
                let message = format!("Unexpected {} in field list", state.current().describe());
                state.error(DiagnosticKind::Syntactic, message);
                state.advance();
                state.synchronize(&[TokenKind::Identifier, TokenKind::End, TokenKind::Semicolon]);
            }
        }
    })
}

fn parse_field(state: &mut ParserState<'_>) {
    state.rule("Field", |state| {
        parse_identifier_list(state);
        expect_or_insert(state, TokenKind::Colon, ":", &TYPE_FOLLOW);
        parse_type_name(state);
        close(state, TokenKind::Semicolon, ";", &[TokenKind::End]);
    })
}

fn parse_identifier_list(state: &mut ParserState<'_>) {
    fn field_name(state: &mut ParserState<'_>) {
        state.skip_unknown_run();
        if state.at(TokenKind::Identifier) {
            state.consume("field");
        } else {
            state.expected("field name");
        }
    }

    state.rule("IdentifierList", |state| {
        field_name(state);
        while state.at(TokenKind::Comma) {
            state.consume(",");
            field_name(state);
        }
    })
}

fn parse_type_name(state: &mut ParserState<'_>) {
    state.rule("TypeName", |state| {
        state.skip_unknown_run();
        let current = state.current();
        if current.kind.is_type_keyword() {
            state.consume("type");
        } else if current.is(TokenKind::Identifier) {
            let message = format!("Unknown type '{}'", current.text());
            state.error(DiagnosticKind::Syntactic, message);
            state.consume("type");
        } else {
            state.expected("type name");
            if !state.at_end() && state.lookahead(1).kind.is_type_keyword() {
                state.advance();
            } else {
                state.insert_synthetic(TokenKind::Integer);
            }
            state.consume("type");
        }
    })
}
