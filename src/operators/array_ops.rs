//! `in`/`merge`.

use crate::coerce::loose_eq;
use crate::error::{JsonLogicError, Result};
use crate::value::Expr;

/// `{"in": [needle, haystack]}`: substring search when `haystack` is a
/// string, loose-equality membership when it's an array.
pub fn in_op(needle: &Expr, haystack: &Expr) -> Result<bool> {
    match haystack {
        Expr::Array(items) => {
            for item in items {
                if loose_eq("in", needle, item)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Expr::Str(hay) => match needle {
            Expr::Str(n) => Ok(hay.contains(n.as_str())),
            _ => Err(JsonLogicError::type_error(
                "in",
                "string haystack requires a string needle",
            )),
        },
        _ => Err(JsonLogicError::type_error(
            "in",
            format!("cannot search within {:?}", haystack.kind()),
        )),
    }
}

/// Flattens every operand one level: array operands contribute their
/// elements, scalar operands contribute themselves.
pub fn merge(operands: &[Expr]) -> Result<Expr> {
    let mut out = Vec::new();
    for operand in operands {
        match operand {
            Expr::Array(items) => out.extend(items.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    Ok(Expr::Array(out))
}
