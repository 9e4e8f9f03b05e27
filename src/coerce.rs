//! The coercion kernel (C2): pairwise type-unification producing the
//! concrete operand types each operator family is defined on.
//!
//! Each public function here implements one family's resolution order
//! directly (identical kinds, numeric promotion, string/bool/null
//! conversions, singleton-array unwrap) rather than routing through a
//! single generic "coerce anything to anything" function — relational
//! comparison and equality diverge enough (see the null-vs-string
//! special case) that folding them into one table obscures more than it
//! saves.

use crate::error::{JsonLogicError, Result};
use crate::value::Expr;
use std::cmp::Ordering;

/// A numeric value in one of the three concrete numeric representations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Int(i64),
    Uint(u64),
    Real(f64),
}

impl Num {
    pub fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Uint(u) => u as f64,
            Num::Real(r) => r,
        }
    }

    pub fn into_expr(self) -> Expr {
        match self {
            Num::Int(i) => Expr::Int(i),
            Num::Uint(u) => Expr::Uint(u),
            Num::Real(r) => Expr::Real(r),
        }
    }
}

/// Parses a string the way JsonLogic parses numeric strings: integer
/// first, then double.
fn parse_str_numeric(op: &'static str, s: &str) -> Result<Num> {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(Num::Int(i));
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Ok(Num::Real(f));
    }
    Err(JsonLogicError::type_error(
        op,
        format!("string '{s}' is not numeric"),
    ))
}

/// Coerces a single value to a number for comparison contexts, where
/// `null` is treated as zero. Arrays are handled by the caller (the
/// singleton-unwrap/array-vs-scalar rules are operator-family specific).
pub fn to_numeric_for_compare(op: &'static str, e: &Expr) -> Result<Num> {
    match e {
        Expr::Int(i) => Ok(Num::Int(*i)),
        Expr::Uint(u) => Ok(Num::Uint(*u)),
        Expr::Real(r) => Ok(Num::Real(*r)),
        Expr::Bool(b) => Ok(Num::Int(if *b { 1 } else { 0 })),
        Expr::Null => Ok(Num::Int(0)),
        Expr::Str(s) => parse_str_numeric(op, s),
        _ => Err(JsonLogicError::type_error(
            op,
            format!("cannot coerce {:?} to a number", e.kind()),
        )),
    }
}

/// Coerces a single value to a number for arithmetic contexts. Returns
/// `Ok(None)` when the value is `Null` — the caller should propagate
/// `Null` as the whole expression's result rather than treat it as zero.
pub fn to_numeric_for_arithmetic(op: &'static str, e: &Expr) -> Result<Option<Num>> {
    match e {
        Expr::Null => Ok(None),
        other => to_numeric_for_compare(op, other).map(Some),
    }
}

/// Unifies a pair of numbers to a common representation, applying the
/// promotion rules: Real infects anything, Int/Uint unify to whichever
/// side can represent both values, otherwise it's a range error.
pub fn unify_numeric(op: &'static str, a: Num, b: Num) -> Result<(Num, Num)> {
    use Num::*;
    match (a, b) {
        (Real(_), _) | (_, Real(_)) => Ok((Real(a.as_f64()), Real(b.as_f64()))),
        (Int(x), Int(y)) => Ok((Int(x), Int(y))),
        (Uint(x), Uint(y)) => Ok((Uint(x), Uint(y))),
        (Int(x), Uint(y)) => {
            if x >= 0 {
                Ok((Uint(x as u64), Uint(y)))
            } else if y <= i64::MAX as u64 {
                Ok((Int(x), Int(y as i64)))
            } else {
                Err(JsonLogicError::range_error(
                    op,
                    format!("cannot unify negative {x} with unsigned {y} exceeding i64::MAX"),
                ))
            }
        }
        (Uint(x), Int(y)) => {
            let (b2, a2) = unify_numeric(op, Int(y), Uint(x))?;
            Ok((a2, b2))
        }
    }
}

/// Coerces a value to its canonical string form for the `Cat`/string
/// family: numbers and booleans render via their textual form, `null`
/// renders empty.
pub fn to_string_coerce(op: &'static str, e: &Expr) -> Result<String> {
    match e {
        Expr::Str(s) => Ok(s.clone()),
        Expr::Null => Ok(String::new()),
        Expr::Bool(b) => Ok(b.to_string()),
        Expr::Int(i) => Ok(i.to_string()),
        Expr::Uint(u) => Ok(u.to_string()),
        Expr::Real(r) => Ok(format_real(*r)),
        _ => Err(JsonLogicError::type_error(
            op,
            format!("cannot coerce {:?} to a string", e.kind()),
        )),
    }
}

/// Renders a double the way JsonLogic implementations typically do:
/// integral doubles print without a trailing `.0`.
pub fn format_real(r: f64) -> String {
    if r.is_finite() && r.fract() == 0.0 && r.abs() < 1e18 {
        format!("{}", r as i64)
    } else {
        format!("{r}")
    }
}

/// Recursively unwraps a singleton array to its single element, per the
/// singleton-array-unwrap rule. Non-singleton arrays and scalars pass
/// through unchanged.
pub fn unwrap_singleton(e: &Expr) -> &Expr {
    match e {
        Expr::Array(items) if items.len() == 1 => unwrap_singleton(&items[0]),
        other => other,
    }
}

/// Loose equality (`Eq`/`Ne`'s shared core), implementing the coercion
/// kernel's full resolution order including the array-vs-scalar rule.
pub fn loose_eq(op: &'static str, a: &Expr, b: &Expr) -> Result<bool> {
    // Rule 7: array-vs-scalar unwrap, tried on whichever side is an array.
    if let Expr::Array(items) = a {
        if items.len() == 1 {
            return loose_eq(op, &items[0], b);
        }
        if let Expr::Array(b_items) = b {
            if b_items.len() == 1 {
                return loose_eq(op, a, &b_items[0]);
            }
            // Two arrays, neither a singleton: never equal (reference semantics).
            return Ok(false);
        }
        return Ok(array_as_scalar_eq(items, b));
    }
    if let Expr::Array(items) = b {
        if items.len() == 1 {
            return loose_eq(op, a, &items[0]);
        }
        return Ok(array_as_scalar_eq(items, a));
    }

    match (a, b) {
        // Rule 1: identical kinds.
        (Expr::Null, Expr::Null) => Ok(true),
        (Expr::Bool(x), Expr::Bool(y)) => Ok(x == y),
        (Expr::Str(x), Expr::Str(y)) => Ok(x == y),
        (Expr::Object(_), Expr::Object(_)) => Ok(false),

        // Rule 5: string-vs-bool is unequal by definition.
        (Expr::Str(_), Expr::Bool(_)) | (Expr::Bool(_), Expr::Str(_)) => Ok(false),

        // Rule 6: null-vs-anything — equality treats null as equal only to null.
        (Expr::Null, _) | (_, Expr::Null) => Ok(false),

        // Rule 3/4/2: numeric family (including string-as-numeric, bool-as-numeric).
        (x, y) if is_eq_numeric_candidate(x) && is_eq_numeric_candidate(y) => {
            let nx = to_numeric_for_compare(op, x)?;
            let ny = to_numeric_for_compare(op, y)?;
            let (ux, uy) = unify_numeric(op, nx, ny)?;
            Ok(num_eq(ux, uy))
        }

        _ => Err(JsonLogicError::type_error(
            op,
            format!("cannot compare {:?} and {:?}", a.kind(), b.kind()),
        )),
    }
}

fn is_eq_numeric_candidate(e: &Expr) -> bool {
    matches!(
        e,
        Expr::Int(_) | Expr::Uint(_) | Expr::Real(_) | Expr::Bool(_) | Expr::Str(_)
    )
}

fn num_eq(a: Num, b: Num) -> bool {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x == y,
        (Num::Uint(x), Num::Uint(y)) => x == y,
        (Num::Real(x), Num::Real(y)) => x == y,
        _ => false, // unify_numeric always produces matching variants
    }
}

/// Array-length-0/>=2 vs scalar equality: length 0 behaves as `false`,
/// length >= 2 is never equal to a scalar.
fn array_as_scalar_eq(items: &[Expr], scalar: &Expr) -> bool {
    if items.is_empty() {
        matches!(scalar, Expr::Bool(false) | Expr::Int(0) | Expr::Uint(0))
            || matches!(scalar, Expr::Real(r) if *r == 0.0)
            || matches!(scalar, Expr::Str(s) if s.is_empty())
    } else {
        false
    }
}

/// Strict equality: no coercion, distinct kinds are unequal, arrays are
/// never strictly-equal (even to themselves), two nulls are equal.
pub fn strict_eq(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Array(_), _) | (_, Expr::Array(_)) => false,
        (Expr::Null, Expr::Null) => true,
        (Expr::Bool(x), Expr::Bool(y)) => x == y,
        (Expr::Int(x), Expr::Int(y)) => x == y,
        (Expr::Uint(x), Expr::Uint(y)) => x == y,
        (Expr::Real(x), Expr::Real(y)) => x == y,
        (Expr::Str(x), Expr::Str(y)) => x == y,
        _ => false,
    }
}

/// The trichotomy a relational comparison resolves to; `Incomparable`
/// means the coercion kernel's short-circuit rule applies (the operator
/// returns `false`, regardless of which of `<`/`>`/`<=`/`>=` was asked).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rel {
    Lt,
    Eq,
    Gt,
    Incomparable,
}

/// Resolves the relative order of two scalars (or recursively, two
/// arrays) per the coercion kernel's relational rules.
pub fn relate(op: &'static str, a: &Expr, b: &Expr) -> Result<Rel> {
    let a = unwrap_singleton(a);
    let b = unwrap_singleton(b);

    if let (Expr::Array(xs), Expr::Array(ys)) = (a, b) {
        return Ok(sequence_compare(op, xs, ys)?);
    }
    if let Expr::Array(items) = a {
        return Ok(if items.is_empty() {
            relate(op, &Expr::Int(0), b)?
        } else {
            Rel::Incomparable
        });
    }
    if let Expr::Array(items) = b {
        return Ok(if items.is_empty() {
            relate(op, a, &Expr::Int(0))?
        } else {
            Rel::Incomparable
        });
    }

    match (a, b) {
        (Expr::Str(x), Expr::Str(y)) => Ok(ordering_to_rel(x.cmp(y))),
        (Expr::Str(_), Expr::Bool(_)) | (Expr::Bool(_), Expr::Str(_)) => Ok(Rel::Incomparable),
        // Null-vs-string only ever resolves true through Le/Ge against an
        // empty string (reported as Eq here); any other string is Incomparable.
        (Expr::Null, Expr::Str(s)) | (Expr::Str(s), Expr::Null) => {
            Ok(if s.is_empty() {
                Rel::Eq
            } else {
                Rel::Incomparable
            })
        }
        (x, y) if is_relate_numeric_candidate(x) && is_relate_numeric_candidate(y) => {
            let nx = to_numeric_for_compare(op, x)?;
            let ny = to_numeric_for_compare(op, y)?;
            let (ux, uy) = unify_numeric(op, nx, ny)?;
            Ok(ordering_to_rel(num_cmp(ux, uy)))
        }
        _ => Err(JsonLogicError::type_error(
            op,
            format!("cannot order {:?} and {:?}", a.kind(), b.kind()),
        )),
    }
}

/// Like [`is_eq_numeric_candidate`] but also admits `Null`, which
/// relational comparison coerces to `0` (§4.2 rule 6) rather than
/// treating as incomparable the way equality does.
fn is_relate_numeric_candidate(e: &Expr) -> bool {
    matches!(e, Expr::Null) || is_eq_numeric_candidate(e)
}

fn ordering_to_rel(o: Ordering) -> Rel {
    match o {
        Ordering::Less => Rel::Lt,
        Ordering::Equal => Rel::Eq,
        Ordering::Greater => Rel::Gt,
    }
}

fn num_cmp(a: Num, b: Num) -> Ordering {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x.cmp(&y),
        (Num::Uint(x), Num::Uint(y)) => x.cmp(&y),
        (Num::Real(x), Num::Real(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal, // unify_numeric always produces matching variants
    }
}

/// Element-wise lexicographic comparison of two arrays, falling back to
/// length comparison when every corresponding pair compares equal.
fn sequence_compare(op: &'static str, xs: &[Expr], ys: &[Expr]) -> Result<Rel> {
    for (x, y) in xs.iter().zip(ys.iter()) {
        match relate(op, x, y)? {
            Rel::Eq => continue,
            other => return Ok(other),
        }
    }
    Ok(ordering_to_rel(xs.len().cmp(&ys.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_equals_itself() {
        assert!(loose_eq("==", &Expr::Int(1), &Expr::Int(1)).unwrap());
        assert!(loose_eq("==", &Expr::Str("x".into()), &Expr::Str("x".into())).unwrap());
    }

    #[test]
    fn arrays_never_equal_themselves() {
        let a = Expr::Array(vec![Expr::Int(1)]);
        let b = Expr::Array(vec![Expr::Int(1)]);
        assert!(!loose_eq("==", &a, &b).unwrap());
    }

    #[test]
    fn singleton_array_unwraps_for_equality() {
        let a = Expr::Array(vec![Expr::Int(1)]);
        assert!(loose_eq("==", &a, &Expr::Int(1)).unwrap());
        let multi = Expr::Array(vec![Expr::Int(1), Expr::Int(2)]);
        assert!(!loose_eq("==", &multi, &Expr::Int(1)).unwrap());
    }

    #[test]
    fn string_vs_bool_is_always_unequal() {
        assert!(!loose_eq("==", &Expr::Str("true".into()), &Expr::Bool(true)).unwrap());
    }

    #[test]
    fn int_uint_unify_when_nonnegative() {
        let (a, b) = unify_numeric("+", Num::Int(5), Num::Uint(3)).unwrap();
        assert_eq!(a, Num::Uint(5));
        assert_eq!(b, Num::Uint(3));
    }

    #[test]
    fn negative_int_vs_large_uint_is_range_error() {
        let err = unify_numeric("+", Num::Int(-1), Num::Uint(u64::MAX)).unwrap_err();
        assert!(matches!(err, JsonLogicError::Range { .. }));
    }

    #[test]
    fn strict_eq_distinguishes_kinds() {
        assert!(!strict_eq(&Expr::Int(1), &Expr::Str("1".into())));
        assert!(strict_eq(&Expr::Null, &Expr::Null));
        assert!(!strict_eq(
            &Expr::Array(vec![Expr::Int(1)]),
            &Expr::Array(vec![Expr::Int(1)])
        ));
    }

    #[test]
    fn relate_orders_numbers() {
        assert_eq!(relate("<", &Expr::Int(1), &Expr::Int(2)).unwrap(), Rel::Lt);
        assert_eq!(relate("<", &Expr::Int(2), &Expr::Int(2)).unwrap(), Rel::Eq);
    }

    #[test]
    fn null_vs_empty_string_is_equal_for_relational_purposes() {
        assert_eq!(
            relate("<=", &Expr::Null, &Expr::Str(String::new())).unwrap(),
            Rel::Eq
        );
    }

    #[test]
    fn null_vs_nonempty_string_is_incomparable() {
        assert_eq!(
            relate("<", &Expr::Null, &Expr::Str("x".into())).unwrap(),
            Rel::Incomparable
        );
    }

    #[test]
    fn null_coerces_to_zero_against_numbers() {
        assert_eq!(relate("<", &Expr::Null, &Expr::Int(1)).unwrap(), Rel::Lt);
    }

    #[test]
    fn relate_sequence_falls_back_to_length() {
        let a = Expr::Array(vec![Expr::Int(1), Expr::Int(2)]);
        let b = Expr::Array(vec![Expr::Int(1), Expr::Int(2), Expr::Int(3)]);
        assert_eq!(relate("<", &a, &b).unwrap(), Rel::Lt);
    }
}
