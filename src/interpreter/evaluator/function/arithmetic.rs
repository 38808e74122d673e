use std::cmp::Ordering;

use crate::{
    ast::Location,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, function::Arity},
    },
};

library_functions! {
    "+"       => { arity: Arity::AtLeast(1), func: add },
    "-"       => { arity: Arity::AtLeast(1), func: subtract },
    "*"       => { arity: Arity::AtLeast(1), func: |_, args, loc| fold_numbers(args, loc, |a, b| a * b) },
    "/"       => { arity: Arity::AtLeast(1), func: |_, args, loc| fold_numbers(args, loc, |a, b| a / b) },
    "modulus" => { arity: Arity::AtLeast(1), func: |_, args, loc| fold_numbers(args, loc, |a, b| a % b) },
    "^"       => { arity: Arity::AtLeast(1), func: |_, args, loc| fold_numbers(args, loc, f64::powf) },
    "=="      => { arity: Arity::Exact(2), func: |_, args, _| Ok(Value::Bool(args[0] == args[1])) },
    "!="      => { arity: Arity::Exact(2), func: |_, args, _| Ok(Value::Bool(args[0] != args[1])) },
    "<"       => { arity: Arity::Exact(2), func: |_, args, loc| compare(args, loc, Ordering::is_lt) },
    "<="      => { arity: Arity::Exact(2), func: |_, args, loc| compare(args, loc, Ordering::is_le) },
    ">"       => { arity: Arity::Exact(2), func: |_, args, loc| compare(args, loc, Ordering::is_gt) },
    ">="      => { arity: Arity::Exact(2), func: |_, args, loc| compare(args, loc, Ordering::is_ge) },
    "not"     => { arity: Arity::Exact(1), func: |_, args, _| Ok(Value::Bool(!args[0].is_truthy())) },
    "xor"     => { arity: Arity::Exact(2), func: |_, args, _| Ok(Value::Bool(args[0].is_truthy() != args[1].is_truthy())) },
    "nil?"    => { arity: Arity::Exact(1), func: |_, args, _| Ok(Value::Bool(args[0].is_nil())) },
    "do"      => { arity: Arity::AtLeast(0), func: |_, args, _| Ok(args.last().cloned().unwrap_or(Value::Nil)) },
    "assert"  => { arity: Arity::Range(1, 2), func: assert },
}

/// Adds numbers, or concatenates when any argument is a string.
///
/// # Example
/// ```
/// use lish::get_value;
///
/// assert_eq!(get_value("(+ 1 2 3)").unwrap().to_string(), "6");
/// assert_eq!(get_value(r#"(+ "v" 1)"#).unwrap().to_string(), "v1");
/// ```
fn add(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    if args.iter().any(|arg| matches!(arg, Value::String(_))) {
        return Ok(Value::String(args.iter().map(Value::to_argument).collect()));
    }
    fold_numbers(args, location, |a, b| a + b)
}

/// Subtracts left to right; a single argument is negated.
fn subtract(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    if let [only] = args {
        return Ok(Value::Number(-only.as_number(location)?));
    }
    fold_numbers(args, location, |a, b| a - b)
}

/// Folds numeric arguments left to right with `op`.
fn fold_numbers(args: &[Value], location: Location, op: impl Fn(f64, f64) -> f64) -> EvalResult<Value> {
    let mut numbers = args.iter().map(|arg| arg.as_number(location));
    let first = numbers.next().unwrap_or(Ok(0.0))?;
    numbers.try_fold(first, |acc, next| Ok(op(acc, next?)))
           .map(Value::Number)
}

/// Orders two numbers or two strings and tests the ordering with `test`.
///
/// Comparisons involving `NaN` are false.
fn compare(args: &[Value], location: Location, test: fn(Ordering) -> bool) -> EvalResult<Value> {
    let ordering = match (&args[0], &args[1]) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(_) | Value::String(_), other) | (other, _) => {
            return Err(RuntimeError::TypeError { expected: "number or string",
                                                 found: other.type_name(),
                                                 location });
        },
    };
    Ok(Value::Bool(ordering.is_some_and(test)))
}

/// `(assert condition [message])`: fails unless `condition` is truthy, and
/// returns it otherwise.
fn assert(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    if args[0].is_truthy() {
        return Ok(args[0].clone());
    }
    Err(RuntimeError::AssertionFailed { message: args.get(1).map(Value::to_argument),
                                        location })
}
