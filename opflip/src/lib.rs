//! # opflip
//!
//! Parses a snippet of Python-style source code, inverts the logical sense
//! of every comparison operator in it (`<` becomes `>=`, `==` becomes `!=`,
//! and so on), and re-emits the modified code, reporting the position and
//! original kind of each operator it inverted.
//!
//! ## Quick start
//!
//! ```rust
//! use opflip::{invert_source, OpflipResult};
//!
//! fn main() -> OpflipResult<()> {
//!     let inversion = invert_source("if x < y:\n    pass")?;
//!
//!     assert_eq!(inversion.code, "if x >= y:\n    pass\n");
//!     assert_eq!(inversion.positions.len(), 1);
//!     assert_eq!(inversion.positions[0].kind, "LESS_THAN");
//!     assert_eq!((inversion.positions[0].line, inversion.positions[0].col), (1, 3));
//!     Ok(())
//! }
//! ```
//!
//! The pass handles nested conditionals (comparisons inside call arguments,
//! inner blocks) and chained comparisons (`a < b <= c`). Identity and
//! membership tests (`is`, `is not`, `in`, `not in`) are preserved
//! untouched: only the six ordering/equality operators have an inverse.
//! Output formatting is canonical rather than preserved: the guarantee is
//! semantic equivalence modulo the performed inversions.

pub mod ast;
pub mod error;
pub mod parser;
pub mod rewriter;
pub mod unparse;

pub use ast::{CmpOp, Expr, ExprKind, Module, Span, Stmt, StmtKind};
pub use error::OpflipError;
pub use parser::parse;
pub use rewriter::{
    invert_module, invert_source, ConditionalInverter, Inversion, InvertedOp, Transform,
};
pub use unparse::unparse;

/// Result type for opflip operations
pub type OpflipResult<T> = Result<T, OpflipError>;

#[cfg(test)]
mod tests;
