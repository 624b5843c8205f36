//! Structured lexical and syntactic diagnostics
//!
//! A [Diagnostic] is one problem found in the analyzed text. Diagnostics never abort
//! an analysis; they are appended to a [DiagnosticCollector] in discovery order, which
//! is not necessarily source order once recovery has skipped ahead.
//!
//! Every diagnostic carries both shapes callers may want: the byte `position` and the
//! character `length` of the offending text, and a 1-based `line` and `column`.

use serde::Serialize;
use std::fmt;

use super::location::SourceLocation;

/// Diagnostic categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// Characters outside the grammar's vocabulary.
    Lexical,
    /// An expected token was not found.
    Syntactic,
    /// A mandatory closing or terminating construct is missing.
    Structural,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "lexical"),
            DiagnosticKind::Syntactic => write!(f, "syntactic"),
            DiagnosticKind::Structural => write!(f, "structural"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Byte offset of the offending text.
    pub position: usize,
    /// Length of the offending text in characters, at least 1.
    pub length: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub column: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} error: {}",
            self.line, self.column, self.kind, self.message
        )
    }
}

/// Accumulates diagnostics for one analysis, resolving positions as they arrive.
#[derive(Debug, Clone)]
pub struct DiagnosticCollector<'src> {
    location: SourceLocation<'src>,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> DiagnosticCollector<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            location: SourceLocation::new(source),
            diagnostics: Vec::new(),
        }
    }

    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        position: usize,
        length: usize,
    ) {
        let start = self.location.byte_to_position(position);
        self.diagnostics.push(Diagnostic {
            kind,
            message: message.into(),
            position,
            length: length.max(1),
            line: start.line + 1,
            column: start.column + 1,
        });
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
