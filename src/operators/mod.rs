//! The operator library (C4): per-operator semantics as pure functions
//! over already-coerced operand values.
//!
//! Operators that must short-circuit their operand evaluation (`and`,
//! `or`, `if`, the sequence combinators) are implemented directly in
//! [`crate::eval`], since they need to control *when* child expressions
//! are evaluated, not just what to do with the results. Everything here
//! instead receives a slice of already-evaluated [`crate::value::Expr`]
//! values and returns the operator's result.

pub mod arithmetic;
pub mod array_ops;
pub mod equality;
pub mod logical;
pub mod regex_op;
pub mod relational;
pub mod string_ops;

pub use arithmetic::{add, div, max, min, modulo, mul, sub};
pub use array_ops::{in_op, merge};
pub use equality::{eq, ne, strict_eq, strict_ne};
pub use logical::{not, not_not};
pub use regex_op::regex_match;
pub use relational::{ge, gt, le, lt};
pub use string_ops::{cat, substr};
