//! Testing utilities for analysis results
//!
//! Tests assert on diagnostics, quads and traces through a fluent API rather than by
//! indexing into vectors by hand. Each failing assertion prints the whole list it was
//! looking at, which is usually all that is needed to see what went wrong.
//!
//! ```rust-example
//! use frontlab::frontlab::testing::{assert_diagnostics, TextMatch};
//!
//! let report = analyze_statement("for i:=1 to 10 x=1;", &AnalysisOptions::default());
//! assert_diagnostics(&report.diagnostics)
//!     .count(1)
//!     .diagnostic(0, |d| {
//!         d.kind(DiagnosticKind::Syntactic)
//!             .message_matches(TextMatch::StartsWith("Expected 'do'".into()))
//!             .at(1, 16);
//!     });
//! ```
//!
//! Quads are easiest to check in their rendered form:
//!
//! ```rust-example
//! assert_quads(&report.quads)
//!     .rendered(&["(-, c, d, t1)", "(*, b, t1, t2)", "(+, a, t2, t3)"])
//!     .well_formed("t");
//! ```

mod testing_assertions;
mod testing_matchers;

pub use testing_assertions::{
    assert_diagnostics, assert_quads, assert_trace, DiagnosticAssertion, DiagnosticsAssertion,
    QuadAssertion, QuadsAssertion, TraceAssertion,
};
pub use testing_matchers::TextMatch;
