use crate::{
    ast::{Expr, LiteralValue, Location},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Fails unless exactly `expected` arguments were supplied.
///
/// # Example
/// ```
/// use lish::{ast::Location, interpreter::evaluator::assertions::check_arity};
///
/// let err = check_arity("not", 1, 2, Location::new(1, 1)).unwrap_err();
/// assert_eq!(err.to_string(), "not takes exactly 1 arguments: found 2 at 1:1");
/// ```
pub fn check_arity(function: &str, expected: usize, found: usize, location: Location) -> EvalResult<()> {
    if found == expected {
        return Ok(());
    }
    Err(RuntimeError::ArgumentCountMismatch { function: function.to_string(),
                                              expected: format!("exactly {expected}"),
                                              found,
                                              location })
}

/// Fails unless between `min` and `max` arguments, inclusive, were supplied.
pub fn check_arity_range(function: &str,
                         min: usize,
                         max: usize,
                         found: usize,
                         location: Location)
                         -> EvalResult<()> {
    if (min..=max).contains(&found) {
        return Ok(());
    }
    Err(RuntimeError::ArgumentCountMismatch { function: function.to_string(),
                                              expected: format!("between {min} and {max}"),
                                              found,
                                              location })
}

/// Fails unless at least `min` arguments were supplied.
pub fn check_arity_min(function: &str, min: usize, found: usize, location: Location) -> EvalResult<()> {
    if found >= min {
        return Ok(());
    }
    Err(RuntimeError::ArgumentCountMismatch { function: function.to_string(),
                                              expected: format!("at least {min}"),
                                              found,
                                              location })
}

/// Returns the name of a `$variable` expression.
///
/// # Errors
/// `ExpectedVariable` for any other kind of expression.
pub fn assert_variable<'a>(function: &str, position: usize, expr: &'a Expr) -> EvalResult<&'a str> {
    match expr {
        Expr::Variable { name, .. } => Ok(name),
        other => Err(RuntimeError::ExpectedVariable { function: function.to_string(),
                                                      position,
                                                      found: other.kind_name(),
                                                      location: other.location() }),
    }
}

/// Returns the elements of an array literal.
///
/// # Errors
/// `ExpectedArrayLiteral` for any other kind of expression.
pub fn assert_array_literal<'a>(function: &str, position: usize, expr: &'a Expr) -> EvalResult<&'a [Expr]> {
    match expr {
        Expr::ArrayLiteral { body, .. } => Ok(body),
        other => Err(RuntimeError::ExpectedArrayLiteral { function: function.to_string(),
                                                          position,
                                                          found: other.kind_name(),
                                                          location: other.location() }),
    }
}

/// Fails unless `expr` is the bare word `keyword`, such as the `in` of a
/// `for` loop.
pub fn assert_keyword(keyword: &'static str, expr: &Expr) -> EvalResult<()> {
    match expr {
        Expr::Value { value: LiteralValue::String(s),
                      .. }
            if s == keyword =>
        {
            Ok(())
        },
        Expr::Value { .. } => Err(RuntimeError::ExpectedKeyword { expected: keyword,
                                                                  found:    expr.to_string(),
                                                                  location: expr.location(), }),
        other => Err(RuntimeError::ExpectedKeyword { expected: keyword,
                                                     found:    other.kind_name().to_string(),
                                                     location: other.location() }),
    }
}

/// The name a binding form defines: a `$variable`, or a bare word for
/// convenience (`(def x 1)`).
///
/// # Errors
/// `ExpectedVariable` for any other kind of expression.
pub fn binding_name<'a>(function: &str, position: usize, expr: &'a Expr) -> EvalResult<&'a str> {
    expr.bare_word()
        .map_or_else(|| assert_variable(function, position, expr), Ok)
}
