//! `==`/`!=`/`===`/`!==`.

use crate::coerce::{loose_eq, strict_eq as strict_eq_kernel};
use crate::error::Result;
use crate::value::Expr;

pub fn eq(a: &Expr, b: &Expr) -> Result<bool> {
    loose_eq("==", a, b)
}

pub fn ne(a: &Expr, b: &Expr) -> Result<bool> {
    loose_eq("!=", a, b).map(|eq| !eq)
}

pub fn strict_eq(a: &Expr, b: &Expr) -> bool {
    strict_eq_kernel(a, b)
}

pub fn strict_ne(a: &Expr, b: &Expr) -> bool {
    !strict_eq_kernel(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ne_is_negation_of_eq() {
        assert!(!eq(&Expr::Int(1), &Expr::Int(2)).unwrap());
        assert!(ne(&Expr::Int(1), &Expr::Int(2)).unwrap());
    }

    #[test]
    fn strict_ne_is_negation_of_strict_eq() {
        assert!(!strict_eq(&Expr::Int(1), &Expr::Str("1".into())));
        assert!(strict_ne(&Expr::Int(1), &Expr::Str("1".into())));
    }
}
