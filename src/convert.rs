//! Clone, printer, and JSON-back conversion (C6).
//!
//! `Expr` already derives `Clone` (C1), which gives deep-copy for free —
//! every variant owns its children, so `#[derive(Clone)]` recurses
//! exactly the way a hand-written deep copy would. This module supplies
//! the other two C6 responsibilities: JSON round-trip and display.

use crate::error::{JsonLogicError, Result};
use crate::value::Expr;
use serde_json::{Number, Value as Json};
use std::fmt;

/// Converts a value-shaped expression node back to JSON. Operator nodes
/// have no JSON representation — they're rules, not values — and
/// produce a logic error rather than panicking.
pub fn to_json(expr: &Expr) -> Result<Json> {
    match expr {
        Expr::Null => Ok(Json::Null),
        Expr::Bool(b) => Ok(Json::Bool(*b)),
        Expr::Int(i) => Ok(Json::Number((*i).into())),
        Expr::Uint(u) => Ok(Json::Number((*u).into())),
        Expr::Real(r) => Number::from_f64(*r).map(Json::Number).ok_or_else(|| {
            JsonLogicError::logic_error(format!("{r} is not a representable JSON number"))
        }),
        Expr::Str(s) => Ok(Json::String(s.clone())),
        Expr::Array(items) => items
            .iter()
            .map(to_json)
            .collect::<Result<Vec<_>>>()
            .map(Json::Array),
        Expr::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(k.clone(), to_json(v)?);
            }
            Ok(Json::Object(out))
        }
        other => Err(JsonLogicError::logic_error(format!(
            "{other:?} is an operator node, not a value, and has no JSON representation"
        ))),
    }
}

impl fmt::Display for Expr {
    /// Value nodes render as their JSON form; operator nodes (which
    /// `to_json` rejects) fall back to their debug form, since `Display`
    /// has no error channel to surface the rejection through.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match to_json(self) {
            Ok(json) => write!(f, "{json}"),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}
