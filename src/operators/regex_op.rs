//! `regex` (extension operator, grounded in the `regex` crate rather than
//! a hand-rolled matcher — see `datalogic-rs`, which reaches for the same
//! crate for its own regex extension).

use crate::coerce::to_string_coerce;
use crate::error::{JsonLogicError, Result};
use crate::value::Expr;
use regex::Regex;

/// `{"regex": [pattern, subject]}`: true when `subject` (coerced to a
/// string) matches `pattern` anywhere, not just as a full match.
pub fn regex_match(pattern: &Expr, subject: &Expr) -> Result<bool> {
    let pattern_str = to_string_coerce("regex", pattern)?;
    let subject_str = to_string_coerce("regex", subject)?;
    let re = Regex::new(&pattern_str)
        .map_err(|e| JsonLogicError::logic_error(format!("invalid regex '{pattern_str}': {e}")))?;
    Ok(re.is_match(&subject_str))
}
