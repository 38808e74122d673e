use crate::{
    ast::Location,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, function::Arity, sequence::Sequence},
    },
    util::num::{f64_to_usize_checked, usize_to_f64},
};

library_functions! {
    "range"   => { arity: Arity::Range(1, 3), func: range },
    "of"      => { arity: Arity::AtLeast(0), func: |_, args, _| Ok(Value::from(args.to_vec())) },
    "from"    => { arity: Arity::Exact(1), func: |_, args, loc| Ok(Value::from(collect(&args[0], loc)?)) },
    "length"  => { arity: Arity::Exact(1), func: |_, args, loc| length(&args[0], loc) },
    "map"     => { arity: Arity::Exact(2), func: map },
    "flatMap" => { arity: Arity::Exact(2), func: flat_map },
    "filter"  => { arity: Arity::Exact(2), func: filter },
    "fold"    => { arity: Arity::Exact(3), func: fold },
    "head"    => { arity: Arity::Exact(1), func: |_, args, loc| Ok(args[0].iter(loc)?.next().unwrap_or(Value::Nil)) },
    "tail"    => { arity: Arity::Exact(1), func: |_, args, loc| skip(&args[0], 1, loc) },
    "init"    => { arity: Arity::Exact(1), func: init },
    "last"    => { arity: Arity::Exact(1), func: |_, args, loc| Ok(args[0].iter(loc)?.last().unwrap_or(Value::Nil)) },
    "take"    => { arity: Arity::Exact(2), func: take },
    "drop"    => { arity: Arity::Exact(2), func: drop },
    "join"    => { arity: Arity::Range(1, 2), func: join },
    "reverse" => { arity: Arity::Exact(1), func: reverse },
}

/// Materializes any iterable into a vector.
pub(crate) fn collect(value: &Value, location: Location) -> EvalResult<Vec<Value>> {
    Ok(value.iter(location)?.collect())
}

/// `(Array.range start [end [step]])`: a lazy numeric range, unbounded when
/// `end` is omitted.
///
/// # Errors
/// `InvalidArgument` if `step` is zero.
fn range(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let start = args[0].as_number(location)?;
    let end = args.get(1).map(|end| end.as_number(location)).transpose()?;
    let step = args.get(2).map_or(Ok(1.0), |step| step.as_number(location))?;

    if step == 0.0 || step.is_nan() {
        return Err(RuntimeError::InvalidArgument { details: "range step must be a non-zero number".into(),
                                                   location });
    }

    Ok(Value::Sequence(Sequence::range(start, end, step)))
}

/// The number of elements. Counting a sequence consumes it.
fn length(value: &Value, location: Location) -> EvalResult<Value> {
    let count = match value {
        Value::Array(items) => items.len(),
        Value::Map(entries) => entries.borrow().len(),
        Value::String(s) => s.chars().count(),
        other => other.iter(location)?.count(),
    };
    Ok(Value::Number(usize_to_f64(count)))
}

fn map(interpreter: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let func = args[1].as_function(location)?;
    args[0].iter(location)?
           .map(|item| interpreter.apply(func, vec![item], location))
           .collect::<EvalResult<Vec<_>>>()
           .map(Value::from)
}

fn flat_map(interpreter: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let func = args[1].as_function(location)?;
    let mut results = Vec::new();
    for item in args[0].iter(location)? {
        let mapped = interpreter.apply(func, vec![item], location)?;
        results.extend(mapped.iter(location)?);
    }
    Ok(Value::from(results))
}

fn filter(interpreter: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let func = args[1].as_function(location)?;
    let mut kept = Vec::new();
    for item in args[0].iter(location)? {
        if interpreter.apply(func, vec![item.clone()], location)?.is_truthy() {
            kept.push(item);
        }
    }
    Ok(Value::from(kept))
}

/// `(Array.fold items init f)`: calls `(f acc item)` for every item.
fn fold(interpreter: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let func = args[2].as_function(location)?;
    args[0].iter(location)?
           .try_fold(args[1].clone(), |acc, item| interpreter.apply(func, vec![acc, item], location))
}

fn init(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let mut items = collect(&args[0], location)?;
    items.pop();
    Ok(Value::from(items))
}

/// `(Array.take items n)`: the first `n` elements. A sequence stays a
/// sequence, so nothing is pulled from it until the result is consumed.
fn take(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let count = f64_to_usize_checked(args[1].as_number(location)?, location)?;
    match &args[0] {
        Value::Sequence(seq) => Ok(Value::Sequence(Sequence::new(seq.iter().take(count)))),
        other => Ok(Value::from(other.iter(location)?.take(count).collect::<Vec<_>>())),
    }
}

fn drop(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let count = f64_to_usize_checked(args[1].as_number(location)?, location)?;
    skip(&args[0], count, location)
}

/// Skips `count` elements. Sequences stay lazy; everything else becomes an
/// array.
fn skip(value: &Value, count: usize, location: Location) -> EvalResult<Value> {
    match value {
        Value::Sequence(seq) => Ok(Value::Sequence(Sequence::new(seq.iter().skip(count)))),
        other => Ok(Value::from(other.iter(location)?.skip(count).collect::<Vec<_>>())),
    }
}

/// `(Array.join items [separator])`: the elements as text, separated by
/// `separator` (a space by default).
fn join(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let separator = args.get(1).map_or(Ok(" "), |sep| sep.as_str(location))?;
    join_with(&args[0], separator, location)
}

/// Joins the elements of an iterable as text.
pub(crate) fn join_with(items: &Value, separator: &str, location: Location) -> EvalResult<Value> {
    let parts = items.iter(location)?
                     .map(|item| item.to_argument())
                     .collect::<Vec<_>>();
    Ok(Value::String(parts.join(separator)))
}

fn reverse(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let mut items = collect(&args[0], location)?;
    items.reverse();
    Ok(Value::from(items))
}
