//! File processing and output formats
//!
//! The processor sits between the engine and a host: it reads a file, runs the
//! analysis for the selected grammar, and renders the result as text.
//!
//! Formats
//!
//!     - simple: a diagnostics table (type, message, line, column), a quad table
//!       (index, op, arg1, arg2, result) for the expression grammar, and the indented
//!       trace.
//!     - json / yaml: the serialized analysis.
//!     - tokens: the token stream of the grammar's lexer, one token per line.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::analysis::{analyze, Analysis, AnalysisOptions};
use super::codegen::Quad;
use super::diagnostics::Diagnostic;
use super::error::FrontlabError;
use super::grammar::Grammar;
use super::lexing::tokenize;
use super::location::SourceLocation;
use super::trace::render_trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Tokens,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Simple,
        OutputFormat::Json,
        OutputFormat::Yaml,
        OutputFormat::Tokens,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Tokens => "tokens",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FrontlabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| FrontlabError::InvalidFormat(s.to_string()))
    }
}

/// All format names, for help output.
pub fn available_formats() -> Vec<&'static str> {
    OutputFormat::ALL.iter().map(|format| format.name()).collect()
}

/// Read `path` and render its analysis in `format`, returning the analysis alongside.
pub fn process_file<P: AsRef<Path>>(
    path: P,
    grammar: Grammar,
    format: OutputFormat,
    options: &AnalysisOptions,
) -> Result<(Analysis, String), FrontlabError> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| FrontlabError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
    process_text(&content, grammar, format, options)
}

/// Analyze `text` and render it in `format`.
pub fn process_text(
    text: &str,
    grammar: Grammar,
    format: OutputFormat,
    options: &AnalysisOptions,
) -> Result<(Analysis, String), FrontlabError> {
    let analysis = analyze(grammar, text, options);
    let output = match format {
        OutputFormat::Simple => format_simple(&analysis, options.indent_width),
        OutputFormat::Json => serde_json::to_string_pretty(&analysis)?,
        OutputFormat::Yaml => serde_yaml::to_string(&analysis)?,
        OutputFormat::Tokens => format_tokens(text, grammar),
    };
    Ok((analysis, output))
}

fn format_simple(analysis: &Analysis, indent_width: usize) -> String {
    let mut sections = vec![format_diagnostics(analysis.diagnostics())];
    if let Some(quads) = analysis.quads() {
        sections.push(format_quads(quads));
    }
    if !analysis.trace().is_empty() {
        sections.push(format!("Trace:\n{}", render_trace(analysis.trace(), indent_width)));
    }
    sections.join("\n\n")
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "Diagnostics: none".to_string();
    }
    let rows = diagnostics
        .iter()
        .map(|d| {
            vec![
                d.kind.to_string(),
                d.message.clone(),
                d.line.to_string(),
                d.column.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    format!(
        "Diagnostics:\n{}",
        table(&["type", "message", "line", "column"], &rows)
    )
}

fn format_quads(quads: &[Quad]) -> String {
    if quads.is_empty() {
        return "Quads: none".to_string();
    }
    let rows = quads
        .iter()
        .enumerate()
        .map(|(index, quad)| {
            vec![
                (index + 1).to_string(),
                quad.op.clone(),
                quad.arg1.clone(),
                quad.arg2.clone().unwrap_or_default(),
                quad.result.clone(),
            ]
        })
        .collect::<Vec<_>>();
    format!(
        "Quads:\n{}",
        table(&["#", "op", "arg1", "arg2", "result"], &rows)
    )
}

/// Left-aligned columns separated by two spaces.
fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        line.trim_end().to_string()
    };

    let mut lines = vec![render(header.to_vec())];
    lines.extend(
        rows.iter()
            .map(|row| render(row.iter().map(String::as_str).collect())),
    );
    lines.join("\n")
}

fn format_tokens(text: &str, grammar: Grammar) -> String {
    let location = SourceLocation::new(text);
    tokenize(text, grammar)
        .iter()
        .map(|token| {
            let position = location.byte_to_position(token.position);
            format!("{}:{}  {}", position.line + 1, position.column + 1, token)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
