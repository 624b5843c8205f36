//! # frontlab
//!
//! An instructional compiler front-end for a handful of deliberately small languages.
//!
//! Every analysis follows the same shape:
//!
//!     source text -> Lexer -> tokens -> Parser / QuadEmitter -> diagnostics, trace, quads
//!
//! Three grammars are supported, selected by the caller (the engine never guesses):
//!
//! - statement:  `for <id> := <operand> to <operand> do <id> = <operand> (+|- <operand>)* ;`
//! - record:     `type <id> = record (<id> (, <id>)* : <type> ;)* end ;`
//! - expression: assignments and arithmetic expressions lowered to quadruples
//!
//! See [frontlab::analysis] for the entry points and [frontlab::testing] for the
//! assertion helpers used throughout the test suite.

pub mod frontlab;

pub use frontlab::analysis::{
    analyze, analyze_record, analyze_statement, emit_quads, validate_record, Analysis,
    AnalysisOptions, QuadError, QuadReport, SyntaxReport,
};
pub use frontlab::grammar::Grammar;
