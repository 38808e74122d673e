use crate::{
    ast::Location,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::array::join_with,
        },
        value::{core::Value, function::Arity},
    },
    util::num::usize_to_f64,
};

library_functions! {
    "split"      => { arity: Arity::Range(1, 2), func: split },
    "join"       => { arity: Arity::Exact(2), func: |_, args, loc| join_with(&args[1], args[0].as_str(loc)?, loc) },
    "trim"       => { arity: Arity::Exact(1), func: |_, args, loc| map_str(&args[0], loc, |s| s.trim().to_string()) },
    "upper"      => { arity: Arity::Exact(1), func: |_, args, loc| map_str(&args[0], loc, str::to_uppercase) },
    "lower"      => { arity: Arity::Exact(1), func: |_, args, loc| map_str(&args[0], loc, str::to_lowercase) },
    "length"     => { arity: Arity::Exact(1), func: |_, args, loc| Ok(Value::Number(usize_to_f64(args[0].as_str(loc)?.chars().count()))) },
    "contains"   => { arity: Arity::Exact(2), func: |_, args, loc| test(args, loc, |s, needle| s.contains(needle)) },
    "startsWith" => { arity: Arity::Exact(2), func: |_, args, loc| test(args, loc, |s, prefix| s.starts_with(prefix)) },
    "endsWith"   => { arity: Arity::Exact(2), func: |_, args, loc| test(args, loc, |s, suffix| s.ends_with(suffix)) },
    "replace"    => { arity: Arity::Exact(3), func: replace },
}

/// `(String.split text [separator])`: splits on `separator`, or on runs of
/// whitespace when none is given. An empty separator splits into characters.
fn split(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let text = args[0].as_str(location)?;
    let parts: Vec<Value> = match args.get(1).map(|s| s.as_str(location)).transpose()? {
        Some("") => text.chars().map(|c| Value::from(c.to_string())).collect(),
        Some(separator) => text.split(separator).map(Value::from).collect(),
        None => text.split_whitespace().map(Value::from).collect(),
    };
    Ok(Value::from(parts))
}

/// `(String.replace text from to)`: replaces every occurrence of `from`.
fn replace(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let text = args[0].as_str(location)?;
    let from = args[1].as_str(location)?;
    let to = args[2].as_str(location)?;
    Ok(Value::String(text.replace(from, to)))
}

fn map_str(value: &Value, location: Location, f: impl Fn(&str) -> String) -> EvalResult<Value> {
    Ok(Value::String(f(value.as_str(location)?)))
}

fn test(args: &[Value], location: Location, f: impl Fn(&str, &str) -> bool) -> EvalResult<Value> {
    Ok(Value::Bool(f(args[0].as_str(location)?, args[1].as_str(location)?)))
}
