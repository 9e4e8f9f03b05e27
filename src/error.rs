//! Error taxonomy for the JsonLogic engine.
//!
//! Every fallible operation in translation and evaluation returns one of
//! three categories: a malformed rule is a [`JsonLogicError::Logic`], an
//! operand that cannot be coerced is a [`JsonLogicError::Type`], and a
//! numeric coercion that would lose information is a
//! [`JsonLogicError::Range`].

use thiserror::Error;

/// The category-tagged error type produced by translation and evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonLogicError {
    /// Operand kinds cannot be coerced for the named operator.
    #[error("type error in '{op}': {detail}")]
    Type { op: &'static str, detail: String },

    /// A numeric coercion would lose information (e.g. a negative signed
    /// value unified against an unsigned value it cannot represent).
    #[error("range error in '{op}': {detail}")]
    Range { op: &'static str, detail: String },

    /// A malformed rule: an unknown operator, a zero- or multi-key
    /// operator object, or an operator called with the wrong arity.
    #[error("logic error: {detail}")]
    Logic { detail: String },
}

impl JsonLogicError {
    pub fn type_error(op: &'static str, detail: impl Into<String>) -> Self {
        JsonLogicError::Type {
            op,
            detail: detail.into(),
        }
    }

    pub fn range_error(op: &'static str, detail: impl Into<String>) -> Self {
        JsonLogicError::Range {
            op,
            detail: detail.into(),
        }
    }

    pub fn logic_error(detail: impl Into<String>) -> Self {
        JsonLogicError::Logic {
            detail: detail.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JsonLogicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_error_carries_operator_and_detail() {
        let err = JsonLogicError::type_error("sub", "cannot coerce bool and string");
        assert_eq!(
            err.to_string(),
            "type error in 'sub': cannot coerce bool and string"
        );
    }

    #[test]
    fn logic_error_has_no_operator_field() {
        let err = JsonLogicError::logic_error("unknown operator 'frobnicate'");
        assert_eq!(err.to_string(), "logic error: unknown operator 'frobnicate'");
    }
}
