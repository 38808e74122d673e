use crate::{ast::Location, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Converts a number to a `usize` if it is a non-negative whole number.
///
/// ## Errors
/// Returns `RuntimeError::InvalidArgument` if the value is negative,
/// fractional, not finite or larger than `MAX_SAFE_INTEGER`.
///
/// ## Example
/// ```
/// use lish::{ast::Location, util::num::f64_to_usize_checked};
///
/// assert_eq!(f64_to_usize_checked(3.0, Location::new(1, 1)).unwrap(), 3);
/// assert!(f64_to_usize_checked(-1.0, Location::new(1, 1)).is_err());
/// assert!(f64_to_usize_checked(2.5, Location::new(1, 1)).is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_usize_checked(value: f64, location: Location) -> EvalResult<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_SAFE_INTEGER {
        return Err(RuntimeError::InvalidArgument { details: format!("expected a non-negative whole number, found {value}"),
                                                   location });
    }
    Ok(value as usize)
}

/// Converts a count or index back to a number.
///
/// Counts in this interpreter never approach `2^53`, so the conversion is
/// exact in practice.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Formats a number the way the language prints it.
///
/// Whole numbers print without a fractional part (`6`, not `6.0`), which is
/// also how they are passed as arguments to external programs.
///
/// ## Example
/// ```
/// use lish::util::num::format_number;
///
/// assert_eq!(format_number(6.0), "6");
/// assert_eq!(format_number(-0.5), "-0.5");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
