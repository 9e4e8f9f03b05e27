//! `cat`/`substr`.

use crate::coerce::to_string_coerce;
use crate::error::{JsonLogicError, Result};
use crate::value::Expr;

pub fn cat(operands: &[Expr]) -> Result<Expr> {
    let mut out = String::new();
    for operand in operands {
        out.push_str(&to_string_coerce("cat", operand)?);
    }
    Ok(Expr::Str(out))
}

/// `{"substr": s}`, `{"substr": [s, start]}`, or `{"substr": [s, start,
/// len]}` — a bare `s` with no start is the whole string. Negative
/// `start`/`len` count from the end of the string, mirroring JsonLogic's
/// Python-`slice`-like semantics. Indices are measured in Unicode scalar
/// values, not bytes.
pub fn substr(operands: &[Expr]) -> Result<Expr> {
    let s = to_string_coerce("substr", &operands[0])?;
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as i64;

    let start = match operands.get(1) {
        Some(arg) => clamp_index(to_numeric_index("substr", arg)?, len),
        None => 0,
    };

    let end = if operands.len() == 3 {
        let count_arg = to_numeric_index("substr", &operands[2])?;
        if count_arg < 0 {
            clamp_index(len + count_arg, len)
        } else {
            (start + count_arg).min(len)
        }
    } else {
        len
    };

    if start >= end {
        return Ok(Expr::Str(String::new()));
    }
    Ok(Expr::Str(chars[start as usize..end as usize].iter().collect()))
}

fn to_numeric_index(op: &'static str, e: &Expr) -> Result<i64> {
    match e {
        Expr::Int(i) => Ok(*i),
        Expr::Uint(u) => Ok(*u as i64),
        Expr::Real(r) => Ok(*r as i64),
        _ => Err(JsonLogicError::type_error(
            op,
            format!("expected a numeric index, found {:?}", e.kind()),
        )),
    }
}

/// Resolves a possibly-negative index against a string of length `len`,
/// clamping to `[0, len]`.
fn clamp_index(idx: i64, len: i64) -> i64 {
    let resolved = if idx < 0 { (len + idx).max(0) } else { idx };
    resolved.min(len)
}
