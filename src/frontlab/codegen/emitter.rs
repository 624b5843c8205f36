//! Expression grammar parser that emits quads
//!
//! ```text
//! Program    → (';' | Statement ';'?)*
//! Statement  → <id> '=' Expression | Expression
//! Expression → Term (('+' | '-') Term)*
//! Term       → Factor (('*' | '/') Factor)*
//! Factor     → <id> | <number> | '(' Expression ')' | '-' Factor
//! ```
//!
//! Recovery is panic mode per statement: the first fault in a statement is reported,
//! further faults in the same statement are silenced, and the emitter skips to the
//! next `;`. Quads of well-formed statements are kept.
//!
//! The `;` after a statement may be left out at the end of a line, but two statements
//! on one line must be separated. Parentheses and unary minus nest at most
//! [MAX_NESTING] deep.

use std::collections::HashSet;

use super::quad::{Quad, TempAllocator};
use crate::frontlab::analysis::{AnalysisOptions, QuadReport};
use crate::frontlab::diagnostics::DiagnosticKind;
use crate::frontlab::grammar::Grammar;
use crate::frontlab::parsing::ParserState;
use crate::frontlab::token::TokenKind;

/// Deepest nesting of `(` and unary `-` accepted in one expression.
pub const MAX_NESTING: usize = 256;

pub struct QuadEmitter<'src> {
    state: ParserState<'src>,
    temps: TempAllocator,
    quads: Vec<Quad>,
    recovering: bool,
    depth: usize,
}

impl<'src> QuadEmitter<'src> {
    pub fn new(source: &'src str, options: &AnalysisOptions) -> Self {
        let mut state = ParserState::new(source, Grammar::Expression, options.record_tokens);
        if !options.trace {
            state.trace.disable();
        }
        let identifiers: HashSet<String> = state
            .tokens()
            .iter()
            .filter(|token| token.is(TokenKind::Identifier))
            .map(|token| token.text().to_string())
            .collect();

        Self {
            state,
            temps: TempAllocator::new(options.temp_prefix.clone(), identifiers),
            quads: Vec::new(),
            recovering: false,
            depth: 0,
        }
    }

    /// Translate the whole program.
    pub fn emit(mut self, summary: bool) -> QuadReport {
        self.program();
        let (diagnostics, trace) = self.state.finish(summary);
        QuadReport {
            quads: self.quads,
            diagnostics,
            trace,
        }
    }

    fn rule<T>(&mut self, name: &str, body: impl FnOnce(&mut Self) -> T) -> T {
        self.state.trace.enter(name);
        let result = body(self);
        self.state.trace.exit(name);
        result
    }

    /// Report the first fault of the current statement; later ones are noise.
    fn error(&mut self, kind: DiagnosticKind, message: String) {
        if self.recovering {
            return;
        }
        self.recovering = true;
        self.state.error(kind, message);
    }

    /// Run `body` one nesting level deeper, refusing to go past [MAX_NESTING].
    fn nested<T>(&mut self, body: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.depth == MAX_NESTING {
            self.error(
                DiagnosticKind::Syntactic,
                "Expression nested too deeply".to_string(),
            );
            return None;
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    fn push(&mut self, quad: Quad) {
        self.state.trace.log(format!("Emit {}", quad));
        self.quads.push(quad);
    }

    fn program(&mut self) {
        self.rule("Program", |this| loop {
            this.state.skip_unknown_run();
            if this.state.at_end() {
                break;
            }
            if this.state.at(TokenKind::Semicolon) {
                this.state.consume(";");
                continue;
            }

            this.recovering = false;
            this.statement();
            if this.recovering {
                this.state.synchronize(&[TokenKind::Semicolon]);
            } else {
                this.separator();
            }
            if this.state.at(TokenKind::Semicolon) {
                this.state.consume(";");
            }
        })
    }

    /// A statement that ends where another one starts on the same line is missing its
    /// `;`. The next statement is still translated.
    fn separator(&mut self) {
        let starts_statement = self.state.at_any(&[
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::LParen,
        ]);
        if starts_statement && !self.state.on_new_line() {
            let message = format!("Expected ';', found {}", self.state.current().describe());
            self.state.error(DiagnosticKind::Structural, message);
        }
    }

    fn statement(&mut self) {
        self.rule("Statement", |this| {
            if this.state.at(TokenKind::Identifier) && this.state.lookahead(1).is(TokenKind::Equal) {
                let target = this.state.current().text().to_string();
                this.state.consume("id");
                this.state.consume("=");
                if let Some(value) = this.expression() {
                    this.push(Quad::assign(value, target));
                }
            } else {
                // A bare expression; its value is computed and left unused.
                this.expression();
            }

            if this.state.at(TokenKind::Equal) {
                this.error(DiagnosticKind::Syntactic, "Invalid assignment target".to_string());
            }
        })
    }

    fn expression(&mut self) -> Option<String> {
        self.rule("Expression", |this| {
            let mut left = this.term()?;
            while let Some(op) = this.operator(&[TokenKind::Plus, TokenKind::Minus]) {
                let right = this.term()?;
                left = this.binary(op, left, right);
            }
            Some(left)
        })
    }

    fn term(&mut self) -> Option<String> {
        self.rule("Term", |this| {
            let mut left = this.factor()?;
            while let Some(op) = this.operator(&[TokenKind::Mul, TokenKind::Div]) {
                let right = this.factor()?;
                left = this.binary(op, left, right);
            }
            Some(left)
        })
    }

    fn factor(&mut self) -> Option<String> {
        self.rule("Factor", |this| {
            this.state.skip_unknown_run();
            let token = this.state.current();
            match token.kind {
                TokenKind::Identifier => {
                    let name = token.text().to_string();
                    this.state.consume("id");
                    Some(name)
                }
                TokenKind::Number => {
                    let literal = token.text().to_string();
                    this.state.consume("num");
                    Some(literal)
                }
                TokenKind::LParen => this.nested(|this| {
                    this.state.consume("(");
                    let inner = this.expression()?;
                    if this.state.at(TokenKind::RParen) {
                        this.state.consume(")");
                    } else {
                        let message =
                            format!("Expected ')', found {}", this.state.current().describe());
                        this.error(DiagnosticKind::Structural, message);
                    }
                    Some(inner)
                }),
                TokenKind::Minus => this.nested(|this| {
                    this.state.consume("-");
                    let operand = this.factor()?;
                    let result = this.temps.fresh();
                    this.push(Quad::unary("minus", operand, result.clone()));
                    Some(result)
                }),
                _ => {
                    let message = format!(
                        "Expected operand (identifier, number or '('), found {}",
                        token.describe()
                    );
                    this.error(DiagnosticKind::Syntactic, message);
                    None
                }
            }
        })
    }

    /// Consume one of `kinds` and return its spelling.
    fn operator(&mut self, kinds: &[TokenKind]) -> Option<String> {
        if !self.state.at_any(kinds) {
            return None;
        }
        let op = self.state.current().text().to_string();
        self.state.consume(&op);
        Some(op)
    }

    fn binary(&mut self, op: String, left: String, right: String) -> String {
        let result = self.temps.fresh();
        self.push(Quad::binary(op, left, right, result.clone()));
        result
    }
}
