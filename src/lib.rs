//! # jsonlogic-engine
//!
//! A translation/evaluation core for [JsonLogic](https://jsonlogic.com):
//! a compact, JSON-encoded rule language where a rule is a tree of
//! operator objects mixed with literal JSON values.
//!
//! The crate is split into the two phases the language naturally
//! decomposes into:
//!
//! - **Translation** ([`translate::create_logic`]): JSON → a typed
//!   expression tree ([`value::Expr`]), with static variable-name
//!   indexing performed in the same pass.
//! - **Evaluation** ([`eval::Evaluator`]): a recursive walk of that tree
//!   against a caller-supplied [`accessor::Accessor`], implementing
//!   JsonLogic's coercion and short-circuit semantics.
//!
//! ## Example
//!
//! ```
//! use jsonlogic_engine::apply_json;
//! use serde_json::json;
//!
//! let rule = json!({"if": [{"<": [{"var": "x"}, 10]}, "small", "big"]});
//! let data = json!({"x": 3});
//! assert_eq!(apply_json(&rule, &data).unwrap(), json!("small"));
//! ```

pub mod accessor;
pub mod coerce;
pub mod convert;
pub mod error;
pub mod eval;
pub mod log;
pub mod operators;
pub mod translate;
pub mod value;

pub use accessor::{data_accessor, Accessor, DataAccessor};
pub use convert::to_json;
pub use error::{JsonLogicError, Result};
pub use eval::Evaluator;
pub use log::{LogSink, StderrSink};
pub use translate::{create_logic, LogicBundle};
pub use value::{Expr, COMPUTED};

use serde_json::Value as Json;

/// Evaluates an already-translated bundle against `accessor`, logging
/// `Log` operator output to the default [`StderrSink`]. Use
/// [`apply_with_sink`] to supply a custom sink.
pub fn apply(bundle: &LogicBundle, accessor: &mut dyn Accessor) -> Result<Expr> {
    let mut sink = StderrSink;
    apply_with_sink(bundle, accessor, &mut sink)
}

/// Like [`apply`], but with an explicit log sink instead of the default.
pub fn apply_with_sink(
    bundle: &LogicBundle,
    accessor: &mut dyn Accessor,
    sink: &mut dyn LogSink,
) -> Result<Expr> {
    Evaluator::new(accessor, sink).eval(&bundle.tree)
}

/// Convenience entry point: translates `rule`, builds the default
/// accessor over `data`, evaluates with the default sink, and converts
/// the result back to JSON.
pub fn apply_json(rule: &Json, data: &Json) -> Result<Json> {
    let bundle = create_logic(rule)?;
    let mut accessor = data_accessor(data);
    let result = apply(&bundle, &mut accessor)?;
    to_json(&result)
}
