//! Three-address code generation for the expression grammar
//!
//! The [QuadEmitter] parses a program of assignments and bare expressions with
//! precedence-climbing recursive descent and lowers every operator into a [Quad]. Each
//! intermediate result gets a fresh temporary from a [TempAllocator]; operands are
//! identifiers, numbers (kept as source text, never evaluated) or earlier temporaries,
//! so every temporary is defined before it is used.
//!
//!     a+b*(c-d)   →   (-, c, d, t1)
//!                     (*, b, t1, t2)
//!                     (+, a, t2, t3)

pub mod emitter;
pub mod quad;

pub use emitter::{QuadEmitter, MAX_NESTING};
pub use quad::{Quad, TempAllocator};
