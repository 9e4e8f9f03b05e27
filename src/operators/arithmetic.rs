//! `+`/`-`/`*`/`/`/`%`/`min`/`max`.
//!
//! Every operator here propagates `Null` operands to a `Null` result
//! rather than treating `Null` as zero, per [`crate::coerce::to_numeric_for_arithmetic`].

use crate::coerce::{to_numeric_for_arithmetic, unify_numeric, Num};
use crate::error::{JsonLogicError, Result};
use crate::value::Expr;

fn num_add(op: &'static str, a: Num, b: Num) -> Result<Num> {
    let (a, b) = unify_numeric(op, a, b)?;
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x
            .checked_add(y)
            .map(Num::Int)
            .ok_or_else(|| JsonLogicError::range_error(op, format!("{x} + {y} overflows i64"))),
        (Num::Uint(x), Num::Uint(y)) => x
            .checked_add(y)
            .map(Num::Uint)
            .ok_or_else(|| JsonLogicError::range_error(op, format!("{x} + {y} overflows u64"))),
        (Num::Real(x), Num::Real(y)) => Ok(Num::Real(x + y)),
        _ => unreachable!("unify_numeric always returns matching variants"),
    }
}

fn num_mul(op: &'static str, a: Num, b: Num) -> Result<Num> {
    let (a, b) = unify_numeric(op, a, b)?;
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x
            .checked_mul(y)
            .map(Num::Int)
            .ok_or_else(|| JsonLogicError::range_error(op, format!("{x} * {y} overflows i64"))),
        (Num::Uint(x), Num::Uint(y)) => x
            .checked_mul(y)
            .map(Num::Uint)
            .ok_or_else(|| JsonLogicError::range_error(op, format!("{x} * {y} overflows u64"))),
        (Num::Real(x), Num::Real(y)) => Ok(Num::Real(x * y)),
        _ => unreachable!("unify_numeric always returns matching variants"),
    }
}

fn num_sub(op: &'static str, a: Num, b: Num) -> Result<Num> {
    let (a, b) = unify_numeric(op, a, b)?;
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x
            .checked_sub(y)
            .map(Num::Int)
            .ok_or_else(|| JsonLogicError::range_error(op, format!("{x} - {y} overflows i64"))),
        (Num::Uint(x), Num::Uint(y)) => x
            .checked_sub(y)
            .map(Num::Uint)
            .ok_or_else(|| JsonLogicError::range_error(op, format!("{x} - {y} underflows u64"))),
        (Num::Real(x), Num::Real(y)) => Ok(Num::Real(x - y)),
        _ => unreachable!("unify_numeric always returns matching variants"),
    }
}

/// Folds `operands` into a single `Num` via `step`, short-circuiting to
/// `Null` the moment any operand is `Null`.
fn fold_numeric(
    op: &'static str,
    operands: &[Expr],
    step: impl Fn(Num, Num) -> Result<Num>,
) -> Result<Expr> {
    let mut acc: Option<Num> = None;
    for operand in operands {
        let Some(n) = to_numeric_for_arithmetic(op, operand)? else {
            return Ok(Expr::Null);
        };
        acc = Some(match acc {
            None => n,
            Some(prev) => step(prev, n)?,
        });
    }
    Ok(acc.map(Num::into_expr).unwrap_or(Expr::Uint(0)))
}

pub fn add(operands: &[Expr]) -> Result<Expr> {
    fold_numeric("+", operands, |a, b| num_add("+", a, b))
}

pub fn mul(operands: &[Expr]) -> Result<Expr> {
    fold_numeric("*", operands, |a, b| num_mul("*", a, b))
}

/// `{"-": [x]}` negates; `{"-": [x, y]}` subtracts.
pub fn sub(operands: &[Expr]) -> Result<Expr> {
    match operands {
        [x] => {
            let Some(n) = to_numeric_for_arithmetic("-", x)? else {
                return Ok(Expr::Null);
            };
            num_sub("-", Num::Int(0), n).map(Num::into_expr)
        }
        [x, y] => fold_numeric("-", &[x.clone(), y.clone()], |a, b| num_sub("-", a, b)),
        _ => Err(JsonLogicError::logic_error(
            "'-' expects 1 or 2 operands",
        )),
    }
}

/// Integral dividend/divisor divide exactly when possible, so `6 / 3` stays
/// `Int(2)` rather than becoming `Real(2.0)`; an inexact integral division
/// promotes to `Real`, matching JsonLogic's "only promote when you must".
/// Division by zero returns `Null`, not an error — see §7.
pub fn div(a: &Expr, b: &Expr) -> Result<Expr> {
    let (Some(na), Some(nb)) = (
        to_numeric_for_arithmetic("/", a)?,
        to_numeric_for_arithmetic("/", b)?,
    ) else {
        return Ok(Expr::Null);
    };
    let (a, b) = unify_numeric("/", na, nb)?;
    Ok(match (a, b) {
        (Num::Int(x), Num::Int(y)) => {
            if y == 0 {
                Expr::Null
            } else if x % y == 0 {
                Expr::Int(x / y)
            } else {
                Expr::Real(x as f64 / y as f64)
            }
        }
        (Num::Uint(x), Num::Uint(y)) => {
            if y == 0 {
                Expr::Null
            } else if x % y == 0 {
                Expr::Uint(x / y)
            } else {
                Expr::Real(x as f64 / y as f64)
            }
        }
        (Num::Real(x), Num::Real(y)) => Expr::Real(x / y),
        _ => unreachable!("unify_numeric always returns matching variants"),
    })
}

/// Integer-only; rejects `Real` operands. Modulo by zero returns `Null`,
/// not an error — see §7.
pub fn modulo(a: &Expr, b: &Expr) -> Result<Expr> {
    let (Some(na), Some(nb)) = (
        to_numeric_for_arithmetic("%", a)?,
        to_numeric_for_arithmetic("%", b)?,
    ) else {
        return Ok(Expr::Null);
    };
    if matches!(na, Num::Real(_)) || matches!(nb, Num::Real(_)) {
        return Err(JsonLogicError::type_error(
            "%",
            "modulo requires integer operands",
        ));
    }
    let (a, b) = unify_numeric("%", na, nb)?;
    Ok(match (a, b) {
        (Num::Int(x), Num::Int(y)) => {
            if y == 0 {
                Expr::Null
            } else {
                Expr::Int(x % y)
            }
        }
        (Num::Uint(x), Num::Uint(y)) => {
            if y == 0 {
                Expr::Null
            } else {
                Expr::Uint(x % y)
            }
        }
        _ => unreachable!("Real already rejected above"),
    })
}

pub fn min(operands: &[Expr]) -> Result<Expr> {
    extremum("min", operands, |ord| ord == std::cmp::Ordering::Less)
}

pub fn max(operands: &[Expr]) -> Result<Expr> {
    extremum("max", operands, |ord| ord == std::cmp::Ordering::Greater)
}

fn extremum(
    op: &'static str,
    operands: &[Expr],
    keep_left_when: impl Fn(std::cmp::Ordering) -> bool,
) -> Result<Expr> {
    let mut best: Option<Num> = None;
    for operand in operands {
        let Some(n) = to_numeric_for_arithmetic(op, operand)? else {
            return Ok(Expr::Null);
        };
        best = Some(match best {
            None => n,
            Some(prev) => {
                let (pa, pb) = unify_numeric(op, prev, n)?;
                let ord = cmp_num(pa, pb);
                if keep_left_when(ord) {
                    pa
                } else {
                    pb
                }
            }
        });
    }
    best.map(Num::into_expr)
        .ok_or_else(|| JsonLogicError::logic_error(format!("'{op}' requires at least one operand")))
}

fn cmp_num(a: Num, b: Num) -> std::cmp::Ordering {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x.cmp(&y),
        (Num::Uint(x), Num::Uint(y)) => x.cmp(&y),
        (Num::Real(x), Num::Real(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => std::cmp::Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sums_mixed_numeric_kinds() {
        assert_eq!(
            add(&[Expr::Uint(1), Expr::Int(2), Expr::Real(0.5)]).unwrap(),
            Expr::Real(3.5)
        );
    }

    #[test]
    fn add_propagates_null() {
        assert_eq!(add(&[Expr::Uint(1), Expr::Null]).unwrap(), Expr::Null);
    }

    #[test]
    fn unary_sub_negates() {
        assert_eq!(sub(&[Expr::Uint(5)]).unwrap(), Expr::Int(-5));
    }

    #[test]
    fn binary_sub_subtracts() {
        assert_eq!(sub(&[Expr::Uint(5), Expr::Uint(3)]).unwrap(), Expr::Uint(2));
    }

    #[test]
    fn div_by_zero_returns_null() {
        assert_eq!(div(&Expr::Uint(1), &Expr::Uint(0)).unwrap(), Expr::Null);
    }

    #[test]
    fn exact_integer_division_stays_integral() {
        assert_eq!(div(&Expr::Uint(6), &Expr::Uint(3)).unwrap(), Expr::Uint(2));
    }

    #[test]
    fn inexact_integer_division_promotes_to_real() {
        assert_eq!(div(&Expr::Uint(7), &Expr::Uint(2)).unwrap(), Expr::Real(3.5));
    }

    #[test]
    fn modulo_matches_remainder() {
        assert_eq!(modulo(&Expr::Uint(7), &Expr::Uint(3)).unwrap(), Expr::Uint(1));
    }

    #[test]
    fn modulo_by_zero_returns_null() {
        assert_eq!(modulo(&Expr::Uint(7), &Expr::Uint(0)).unwrap(), Expr::Null);
    }

    #[test]
    fn modulo_rejects_real_operands() {
        let err = modulo(&Expr::Real(7.5), &Expr::Uint(2)).unwrap_err();
        assert!(matches!(err, JsonLogicError::Type { .. }));
    }

    #[test]
    fn min_and_max_pick_extremes() {
        let operands = [Expr::Int(3), Expr::Int(-1), Expr::Int(7)];
        assert_eq!(min(&operands).unwrap(), Expr::Int(-1));
        assert_eq!(max(&operands).unwrap(), Expr::Int(7));
    }

    #[test]
    fn overflowing_add_is_range_error() {
        let err = add(&[Expr::Int(i64::MAX), Expr::Int(1)]).unwrap_err();
        assert!(matches!(err, JsonLogicError::Range { .. }));
    }
}
