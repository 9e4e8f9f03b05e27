//! `<`/`>`/`<=`/`>=`, each a pairwise predicate. The 3-operand chained
//! form (`{"<": [1, x, 10]}`) is assembled in [`crate::eval`] by applying
//! the pairwise predicate across consecutive operands.

use crate::coerce::{relate, Rel};
use crate::error::Result;
use crate::value::Expr;

pub fn lt(a: &Expr, b: &Expr) -> Result<bool> {
    Ok(matches!(relate("<", a, b)?, Rel::Lt))
}

pub fn gt(a: &Expr, b: &Expr) -> Result<bool> {
    Ok(matches!(relate(">", a, b)?, Rel::Gt))
}

pub fn le(a: &Expr, b: &Expr) -> Result<bool> {
    Ok(matches!(relate("<=", a, b)?, Rel::Lt | Rel::Eq))
}

pub fn ge(a: &Expr, b: &Expr) -> Result<bool> {
    Ok(matches!(relate(">=", a, b)?, Rel::Gt | Rel::Eq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lt_and_gt_disagree_on_equal_operands() {
        assert!(!lt(&Expr::Int(2), &Expr::Int(2)).unwrap());
        assert!(!gt(&Expr::Int(2), &Expr::Int(2)).unwrap());
        assert!(le(&Expr::Int(2), &Expr::Int(2)).unwrap());
        assert!(ge(&Expr::Int(2), &Expr::Int(2)).unwrap());
    }

    #[test]
    fn incomparable_operands_are_not_less_than() {
        assert!(!lt(&Expr::Str("a".into()), &Expr::Bool(true)).unwrap());
    }
}
