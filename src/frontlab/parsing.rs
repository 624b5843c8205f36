//! Recursive-descent parsing with error recovery
//!
//! Both validating grammars are written as plain functions over a shared, owned
//! [ParserState]: one function per grammar rule, calling each other exactly as the
//! productions do, so the trace mirrors the grammar's shape.
//!
//! Recovery
//!
//!     The state offers the recovery primitives; each grammar decides how to use them.
//!
//!     - Unknown runs: a leading run of `Unknown` tokens is reported once and skipped.
//!     - Single-token repair: when an expected token is absent, the parser first tries
//!       to explain the fault locally (an extra token before the expected one, a wrong
//!       token in its place, or a missing token) before falling back.
//!     - Synchronization: panic mode, discarding tokens up to a recovery set.
//!     - Synthetic insertion: the record grammar inserts the missing token into the
//!       token sequence and carries on as if it had been there.
//!
//! Termination
//!
//!     Every rule consumes at least one token or hands over to a rule that does, and
//!     the cursor never moves past the end-of-input token, so a parse takes a number
//!     of steps bounded by the token count.

pub mod record;
pub mod state;
pub mod statement;

pub use record::parse_record;
pub use state::{ParserState, Repair};
pub use statement::parse_statement;
