//! Analysis entry points
//!
//! Every entry point is a pure function of the source text and the options: it builds
//! a private [ParserState](crate::frontlab::parsing::ParserState), runs one grammar
//! over it and returns the owned results. Nothing is shared between calls, so
//! separate analyses may run on separate threads.

use serde::Serialize;
use std::fmt;

use super::codegen::{Quad, QuadEmitter};
use super::config::FrontlabConfig;
use super::diagnostics::Diagnostic;
use super::grammar::Grammar;
use super::parsing::{parse_record, parse_statement};
use super::trace::TraceEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Record a trace at all.
    pub trace: bool,
    /// Spaces per trace nesting level when rendering.
    pub indent_width: usize,
    /// Record matched tokens in the trace, not only rule entry and exit.
    pub record_tokens: bool,
    /// Close the trace with a summary line.
    pub summary: bool,
    pub temp_prefix: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            trace: true,
            indent_width: 2,
            record_tokens: true,
            summary: true,
            temp_prefix: "t".to_string(),
        }
    }
}

impl From<&FrontlabConfig> for AnalysisOptions {
    fn from(config: &FrontlabConfig) -> Self {
        Self {
            trace: config.trace.enabled,
            indent_width: config.trace.indent_width,
            record_tokens: config.trace.record_tokens,
            summary: config.trace.summary,
            temp_prefix: config.quads.temp_prefix.clone(),
        }
    }
}

/// Result of the validating grammars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxReport {
    pub diagnostics: Vec<Diagnostic>,
    pub trace: Vec<TraceEntry>,
}

impl SyntaxReport {
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Result of quad emission. Quads of well-formed statements are kept even when other
/// statements fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuadReport {
    pub quads: Vec<Quad>,
    pub diagnostics: Vec<Diagnostic>,
    pub trace: Vec<TraceEntry>,
}

impl QuadReport {
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The all-or-nothing view: the quads, or every diagnostic together with the quads
    /// emitted before giving up.
    pub fn into_result(self) -> Result<Vec<Quad>, QuadError> {
        if self.diagnostics.is_empty() {
            Ok(self.quads)
        } else {
            Err(QuadError {
                diagnostics: self.diagnostics,
                partial: self.quads,
            })
        }
    }
}

/// Quad emission failed; carries the full diagnostic list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadError {
    pub diagnostics: Vec<Diagnostic>,
    pub partial: Vec<Quad>,
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quad emission failed with {} error(s)", self.diagnostics.len())?;
        for diagnostic in &self.diagnostics {
            write!(f, "\n  {}", diagnostic)?;
        }
        Ok(())
    }
}

impl std::error::Error for QuadError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Analysis {
    Syntax(SyntaxReport),
    Quads(QuadReport),
}

impl Analysis {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Analysis::Syntax(report) => &report.diagnostics,
            Analysis::Quads(report) => &report.diagnostics,
        }
    }

    pub fn trace(&self) -> &[TraceEntry] {
        match self {
            Analysis::Syntax(report) => &report.trace,
            Analysis::Quads(report) => &report.trace,
        }
    }

    pub fn quads(&self) -> Option<&[Quad]> {
        match self {
            Analysis::Syntax(_) => None,
            Analysis::Quads(report) => Some(&report.quads),
        }
    }
}

/// Validate a bounded `for` statement.
pub fn analyze_statement(text: &str, options: &AnalysisOptions) -> SyntaxReport {
    parse_statement(text, options)
}

/// Validate a record type declaration.
pub fn analyze_record(text: &str, options: &AnalysisOptions) -> SyntaxReport {
    parse_record(text, options)
}

/// Diagnostics of a record type declaration. Never fails.
pub fn validate_record(text: &str) -> Vec<Diagnostic> {
    parse_record(text, &AnalysisOptions::default()).diagnostics
}

/// Translate an expression program into quads.
pub fn emit_quads(text: &str, options: &AnalysisOptions) -> QuadReport {
    QuadEmitter::new(text, options).emit(options.summary)
}

/// Run the engine selected by `grammar`.
pub fn analyze(grammar: Grammar, text: &str, options: &AnalysisOptions) -> Analysis {
    match grammar {
        Grammar::Statement => Analysis::Syntax(analyze_statement(text, options)),
        Grammar::Record => Analysis::Syntax(analyze_record(text, options)),
        Grammar::Expression => Analysis::Quads(emit_quads(text, options)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_grammar() {
        let options = AnalysisOptions::default();
        let analysis = analyze(Grammar::Expression, "x = a + b", &options);
        assert_eq!(analysis.quads().map(|q| q.len()), Some(2));

        let analysis = analyze(Grammar::Statement, "for i:=1 to 2 do x=1;", &options);
        assert!(analysis.quads().is_none());
        assert!(analysis.diagnostics().is_empty());
    }

    #[test]
    fn test_into_result() {
        let options = AnalysisOptions::default();
        assert_eq!(emit_quads("a*b", &options).into_result().map(|q| q.len()), Ok(1));

        let error = emit_quads("x = a * b; y = )", &options)
            .into_result()
            .unwrap_err();
        assert_eq!(error.diagnostics.len(), 1);
        assert_eq!(error.partial.len(), 2);
        assert!(error.to_string().starts_with("quad emission failed with 1 error(s)"));
    }

    #[test]
    fn test_trace_can_omit_tokens_and_summary() {
        let options = AnalysisOptions {
            record_tokens: false,
            summary: false,
            ..AnalysisOptions::default()
        };
        let report = analyze_statement("for i:=1 to 2 do x=1;", &options);
        assert!(report.trace.iter().all(|e| !e.text.starts_with("Token:")));
        assert_eq!(report.trace.last().map(|e| e.text.as_str()), Some("Exit <For>"));
    }

    #[test]
    fn test_trace_can_be_disabled() {
        let options = AnalysisOptions {
            trace: false,
            ..AnalysisOptions::default()
        };
        assert!(analyze_record("type P = record end", &options).trace.is_empty());
        assert!(emit_quads("a+b", &options).trace.is_empty());
    }

    #[test]
    fn test_validate_record() {
        assert!(validate_record("type P = record x: integer; end;").is_empty());
        assert_eq!(validate_record("type P = record x: integer;").len(), 1);
    }

    #[test]
    fn test_analyses_are_independent_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let source = format!("x{} = a + b * c", i);
                    emit_quads(&source, &AnalysisOptions::default()).quads
                })
            })
            .collect();
        for handle in handles {
            let quads = handle.join().unwrap();
            assert_eq!(quads[0].result, "t1");
        }
    }
}
