//! Fluent assertions over analysis results

use super::testing_matchers::TextMatch;
use crate::frontlab::codegen::Quad;
use crate::frontlab::diagnostics::{Diagnostic, DiagnosticKind};
use crate::frontlab::trace::TraceEntry;

// ============================================================================
// Entry Points
// ============================================================================

pub fn assert_diagnostics(diagnostics: &[Diagnostic]) -> DiagnosticsAssertion<'_> {
    DiagnosticsAssertion { diagnostics }
}

pub fn assert_quads(quads: &[Quad]) -> QuadsAssertion<'_> {
    QuadsAssertion { quads }
}

pub fn assert_trace(trace: &[TraceEntry]) -> TraceAssertion<'_> {
    TraceAssertion { trace }
}

fn summarize_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Diagnostics
// ============================================================================

pub struct DiagnosticsAssertion<'a> {
    diagnostics: &'a [Diagnostic],
}

impl<'a> DiagnosticsAssertion<'a> {
    pub fn none(self) -> Self {
        assert!(
            self.diagnostics.is_empty(),
            "Expected no diagnostics, found: [{}]",
            summarize_diagnostics(self.diagnostics)
        );
        self
    }

    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.diagnostics.len(),
            expected,
            "Expected {} diagnostics, found {}: [{}]",
            expected,
            self.diagnostics.len(),
            summarize_diagnostics(self.diagnostics)
        );
        self
    }

    /// Messages in discovery order, compared exactly.
    pub fn messages(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(actual, expected, "Diagnostic messages differ");
        self
    }

    pub fn diagnostic<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(DiagnosticAssertion<'a>),
    {
        assert!(
            index < self.diagnostics.len(),
            "Diagnostic index {} out of bounds ({} diagnostics: [{}])",
            index,
            self.diagnostics.len(),
            summarize_diagnostics(self.diagnostics)
        );
        assertion(DiagnosticAssertion {
            diagnostic: &self.diagnostics[index],
            context: format!("diagnostics[{}]", index),
        });
        self
    }

    pub fn any_message(self, pattern: TextMatch) -> Self {
        assert!(
            self.diagnostics.iter().any(|d| pattern.matches(&d.message)),
            "No diagnostic message {}: [{}]",
            pattern,
            summarize_diagnostics(self.diagnostics)
        );
        self
    }
}

pub struct DiagnosticAssertion<'a> {
    diagnostic: &'a Diagnostic,
    context: String,
}

impl DiagnosticAssertion<'_> {
    pub fn kind(self, expected: DiagnosticKind) -> Self {
        assert_eq!(
            self.diagnostic.kind, expected,
            "{}: expected kind {}, found {}",
            self.context, expected, self.diagnostic.kind
        );
        self
    }

    pub fn message(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.diagnostic.message, &self.context);
        self
    }

    pub fn message_matches(self, pattern: TextMatch) -> Self {
        pattern.assert(&self.diagnostic.message, &self.context);
        self
    }

    /// 1-based line and column.
    pub fn at(self, line: usize, column: usize) -> Self {
        assert_eq!(
            (self.diagnostic.line, self.diagnostic.column),
            (line, column),
            "{}: wrong line:column for '{}'",
            self.context,
            self.diagnostic.message
        );
        self
    }

    pub fn position(self, expected: usize) -> Self {
        assert_eq!(
            self.diagnostic.position, expected,
            "{}: wrong position for '{}'",
            self.context, self.diagnostic.message
        );
        self
    }

    pub fn length(self, expected: usize) -> Self {
        assert_eq!(
            self.diagnostic.length, expected,
            "{}: wrong length for '{}'",
            self.context, self.diagnostic.message
        );
        self
    }
}

// ============================================================================
// Quads
// ============================================================================

pub struct QuadsAssertion<'a> {
    quads: &'a [Quad],
}

impl<'a> QuadsAssertion<'a> {
    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.quads.len(),
            expected,
            "Expected {} quads, found {}: {:?}",
            expected,
            self.quads.len(),
            self.rendered_quads()
        );
        self
    }

    /// Compare against the `(op, arg1, arg2, result)` rendering of every quad.
    pub fn rendered(self, expected: &[&str]) -> Self {
        assert_eq!(self.rendered_quads(), expected, "Quads differ");
        self
    }

    pub fn quad<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(QuadAssertion<'a>),
    {
        assert!(
            index < self.quads.len(),
            "Quad index {} out of bounds ({} quads)",
            index,
            self.quads.len()
        );
        assertion(QuadAssertion {
            quad: &self.quads[index],
            context: format!("quads[{}]", index),
        });
        self
    }

    /// Every temporary named `<prefix><n>` is a result before it is an argument, and
    /// temporaries are produced in strictly increasing order. Only meaningful when no
    /// source identifier looks like a temporary.
    pub fn well_formed(self, prefix: &str) -> Self {
        let temp_number = |name: &str| -> Option<usize> {
            name.strip_prefix(prefix).and_then(|rest| rest.parse().ok())
        };

        let mut defined: Vec<&str> = Vec::new();
        let mut last = 0;
        for (index, quad) in self.quads.iter().enumerate() {
            for arg in std::iter::once(quad.arg1.as_str()).chain(quad.arg2.as_deref()) {
                if temp_number(arg).is_some() {
                    assert!(
                        defined.contains(&arg),
                        "quads[{}]: temporary {} used before it is defined",
                        index,
                        arg
                    );
                }
            }
            if quad.op != "=" {
                if let Some(number) = temp_number(quad.result.as_str()) {
                    assert!(
                        number > last,
                        "quads[{}]: temporary {} does not follow {}{}",
                        index,
                        quad.result,
                        prefix,
                        last
                    );
                    last = number;
                }
            }
            defined.push(quad.result.as_str());
        }
        self
    }

    fn rendered_quads(&self) -> Vec<String> {
        self.quads.iter().map(|q| q.to_string()).collect()
    }
}

pub struct QuadAssertion<'a> {
    quad: &'a Quad,
    context: String,
}

impl QuadAssertion<'_> {
    pub fn op(self, expected: &str) -> Self {
        assert_eq!(self.quad.op, expected, "{}: wrong op in {}", self.context, self.quad);
        self
    }

    pub fn args(self, arg1: &str, arg2: Option<&str>) -> Self {
        assert_eq!(
            (self.quad.arg1.as_str(), self.quad.arg2.as_deref()),
            (arg1, arg2),
            "{}: wrong arguments in {}",
            self.context,
            self.quad
        );
        self
    }

    pub fn result(self, expected: &str) -> Self {
        assert_eq!(
            self.quad.result, expected,
            "{}: wrong result in {}",
            self.context, self.quad
        );
        self
    }
}

// ============================================================================
// Trace
// ============================================================================

pub struct TraceAssertion<'a> {
    trace: &'a [TraceEntry],
}

impl TraceAssertion<'_> {
    /// Every `Enter <Rule>` has a matching `Exit <Rule>` at the same depth, and the
    /// trace ends back at depth 0.
    pub fn balanced(self) -> Self {
        let mut open: Vec<(&str, usize)> = Vec::new();
        for (index, entry) in self.trace.iter().enumerate() {
            if let Some(rule) = entry.text.strip_prefix("Enter ") {
                open.push((rule, entry.depth));
            } else if let Some(rule) = entry.text.strip_prefix("Exit ") {
                let entered = open.pop();
                assert_eq!(
                    entered,
                    Some((rule, entry.depth)),
                    "trace[{}]: '{}' does not close the innermost open rule",
                    index,
                    entry.text
                );
            }
        }
        assert!(open.is_empty(), "Rules never exited: {:?}", open);
        if let Some(last) = self.trace.last() {
            assert_eq!(last.depth, 0, "Trace does not end at depth 0");
        }
        self
    }

    pub fn contains(self, pattern: TextMatch) -> Self {
        assert!(
            self.trace.iter().any(|e| pattern.matches(&e.text)),
            "No trace line {}",
            pattern
        );
        self
    }

    pub fn line(self, index: usize, pattern: TextMatch, depth: usize) -> Self {
        assert!(index < self.trace.len(), "Trace index {} out of bounds", index);
        let entry = &self.trace[index];
        pattern.assert(&entry.text, &format!("trace[{}]", index));
        assert_eq!(entry.depth, depth, "trace[{}]: wrong depth", index);
        self
    }

    pub fn last(self, pattern: TextMatch) -> Self {
        match self.trace.last() {
            Some(entry) => pattern.assert(&entry.text, "last trace line"),
            None => panic!("Trace is empty"),
        }
        self
    }
}
