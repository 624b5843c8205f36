//! Lexer
//!
//! Tokenization happens in two layers:
//!
//! 1. Raw scanning with logos ([raw]). The raw layer knows nothing about grammars: it
//!    recognizes words, digit runs and operator characters, and skips whitespace.
//! 2. Classification against a grammar's [vocabulary]. Words become keywords or
//!    identifiers, operators outside the grammar become `Unknown`, and the expression
//!    grammar joins `digits [.,] digits` into a single decimal literal.
//!
//! The lexer never fails. Characters it cannot place are handed to the parser as
//! `Unknown` tokens, and the parser decides how to report them.

pub mod lexer;
pub mod raw;
pub mod vocabulary;

pub use lexer::{tokenize, Lexer};
pub use raw::RawToken;
pub use vocabulary::Vocabulary;
