//! Per-analysis parser state
//!
//! [ParserState] owns everything one analysis mutates: the token sequence, the
//! cursor, the diagnostics and the trace. It is created by an entry point, passed by
//! reference into the rule functions, and consumed by [ParserState::finish]. Nothing
//! here is shared between analyses.

use crate::frontlab::diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind};
use crate::frontlab::grammar::Grammar;
use crate::frontlab::lexing::tokenize;
use crate::frontlab::token::{Token, TokenKind};
use crate::frontlab::trace::{TraceEntry, TraceLogger};

/// How a missing expected token was explained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    /// The current token was extraneous; it was skipped and the expected token consumed.
    Deleted,
    /// The current token sits where the expected one belongs; it was consumed instead.
    Replaced,
    /// The current token starts what follows; the expected token is simply missing.
    Missing,
    /// No local explanation fits. Nothing was consumed.
    Unexplained,
}

#[derive(Debug)]
pub struct ParserState<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    cursor: usize,
    pub diagnostics: DiagnosticCollector<'src>,
    pub trace: TraceLogger,
    end_reported: bool,
}

impl<'src> ParserState<'src> {
    pub fn new(source: &'src str, grammar: Grammar, record_tokens: bool) -> Self {
        Self {
            source,
            tokens: tokenize(source, grammar),
            cursor: 0,
            diagnostics: DiagnosticCollector::new(source),
            trace: TraceLogger::new(record_tokens),
            end_reported: false,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Token {
        self.lookahead(0)
    }

    /// The token `n` places after the cursor; the end-of-input token past the end.
    pub fn lookahead(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.cursor + n).min(last)]
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    pub fn at_any(&self, kinds: &[TokenKind]) -> bool {
        self.current().is_any(kinds)
    }

    pub fn at_end(&self) -> bool {
        self.at(TokenKind::EndOfInput)
    }

    /// Whether a line break separates the current token from the one before it.
    pub fn on_new_line(&self) -> bool {
        match self.cursor.checked_sub(1) {
            Some(previous) => {
                let gap = self.tokens[previous].end()..self.current().position;
                self.source[gap].contains('\n')
            }
            None => true,
        }
    }

    /// Move past the current token. The cursor stays on end-of-input once there.
    pub fn advance(&mut self) {
        if !self.at_end() {
            self.cursor += 1;
        }
    }

    /// Trace the current token under `label` and move past it.
    pub fn consume(&mut self, label: &str) {
        let token = self.current();
        let value = match token.kind {
            TokenKind::Identifier | TokenKind::Number => Some(token.text().to_string()),
            _ => None,
        };
        match (token.synthetic, value) {
            (true, _) => self.trace.token(&format!("{} (inserted)", label), None),
            (false, value) => self.trace.token(label, value.as_deref()),
        }
        self.advance();
    }

    /// Run `body` as the grammar rule `name`, bracketed by enter/exit trace entries.
    pub fn rule<T>(&mut self, name: &str, body: impl FnOnce(&mut Self) -> T) -> T {
        self.trace.enter(name);
        let result = body(self);
        self.trace.exit(name);
        result
    }

    /// Report a problem at the current token.
    ///
    /// Only the first problem found at end of input is kept: once the input has run
    /// out, every later expectation fails at the same spot for the same reason.
    pub fn error(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let token = self.current();
        let (position, length) = (token.position, token.display_len());
        if token.is(TokenKind::EndOfInput) {
            if self.end_reported {
                return;
            }
            self.end_reported = true;
        }
        self.diagnostics.report(kind, message, position, length);
    }

    /// "Expected X, found Y" at the current token.
    pub fn expected(&mut self, what: &str) {
        let message = format!("Expected {}, found {}", what, self.current().describe());
        self.error(DiagnosticKind::Syntactic, message);
    }

    /// Skip and report a run of consecutive `Unknown` tokens as a single diagnostic.
    ///
    /// Returns whether a run was skipped.
    pub fn skip_unknown_run(&mut self) -> bool {
        if !self.at(TokenKind::Unknown) {
            return false;
        }

        let start = self.current().position;
        let mut end = start;
        let mut text = String::new();
        while self.at(TokenKind::Unknown) {
            let token = self.current();
            text.push_str(token.text());
            end = token.end();
            self.advance();
        }

        let length = self.source[start..end].chars().count();
        self.diagnostics.report(
            DiagnosticKind::Lexical,
            format!("Invalid character(s) '{}'", text),
            start,
            length,
        );
        true
    }

    /// Panic mode: discard tokens until one of `targets` or end of input.
    ///
    /// Returns the number of tokens discarded.
    pub fn synchronize(&mut self, targets: &[TokenKind]) -> usize {
        let mut skipped = 0;
        while !self.at_end() && !self.at_any(targets) {
            self.advance();
            skipped += 1;
        }
        if skipped > 0 {
            self.trace.log(format!("Recovery: skipped {} token(s)", skipped));
        }
        skipped
    }

    /// Report a missing `kind` and try to explain it with a single-token repair.
    ///
    /// `follow` holds the kinds that may legally come right after `kind`.
    pub fn repair(&mut self, kind: TokenKind, label: &str, follow: &[TokenKind]) -> Repair {
        self.expected(kind.describe());
        if self.at_end() {
            return Repair::Unexplained;
        }

        if self.lookahead(1).is(kind) {
            self.advance();
            self.consume(label);
            Repair::Deleted
        } else if self.lookahead(1).is_any(follow) {
            let replaced = format!("{} (replaced {})", label, self.current().describe());
            self.trace.token(&replaced, None);
            self.advance();
            Repair::Replaced
        } else if self.at_any(follow) {
            Repair::Missing
        } else {
            Repair::Unexplained
        }
    }

    /// Insert a zero-width synthetic token of `kind` before the current token.
    pub fn insert_synthetic(&mut self, kind: TokenKind) {
        let position = self.current().position;
        self.tokens.insert(self.cursor, Token::synthetic(kind, position));
    }

    /// Close the trace with a summary line and hand back the results.
    pub fn finish(mut self, summary: bool) -> (Vec<Diagnostic>, Vec<TraceEntry>) {
        if summary {
            let message = match self.diagnostics.len() {
                0 => "Analysis completed successfully. No errors found.".to_string(),
                n => format!("Analysis completed with {} error(s).", n),
            };
            self.trace.log(message);
        }
        (self.diagnostics.into_vec(), self.trace.into_entries())
    }
}
