/// Numeric conversion helpers.
///
/// The language has a single number type (`f64`). Indexes, counts and
/// exponents need integers, so this module provides checked conversions that
/// refuse fractional, negative or non-finite inputs instead of truncating them
/// silently.
pub mod num;
