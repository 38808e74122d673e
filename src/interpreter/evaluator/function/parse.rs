use std::collections::BTreeMap;

use regex::Regex;

use crate::{
    ast::Location,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            assertions::check_arity_range,
            core::{EvalResult, Interpreter},
            function::array::collect,
        },
        value::{
            core::{MapKey, Value},
            function::Arity,
        },
    },
};

library_functions! {
    "words"  => { arity: Arity::Exact(1), func: |_, args, loc| Ok(Value::from(args[0].as_str(loc)?.split_whitespace().map(Value::from).collect::<Vec<_>>())) },
    "lines"  => { arity: Arity::Exact(1), func: |_, args, loc| Ok(Value::from(args[0].as_str(loc)?.lines().map(Value::from).collect::<Vec<_>>())) },
    "table"  => { arity: Arity::Range(2, 3), func: table },
    "json"   => { arity: Arity::Exact(1), func: json },
    "number" => { arity: Arity::Exact(1), func: number },
}

/// Splits tabular text into one map per non-blank line.
///
/// Called as `(Parse.table [keys] text)` or `(Parse.table delimiter [keys]
/// text)`. The delimiter is a regular expression and defaults to `\s+`.
/// Columns beyond the keys are dropped; missing columns are `null`.
fn table(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let (delimiter, keys, text) = match args {
        [keys, text] => (r"\s+", keys, text),
        [delimiter, keys, text] => (delimiter.as_str(location)?, keys, text),
        _ => return check_arity_range("table", 2, 3, args.len(), location).map(|()| Value::Nil),
    };

    let delimiter = Regex::new(delimiter).map_err(|e| {
                                              RuntimeError::InvalidArgument { details: format!("invalid delimiter: {e}"),
                                                                              location }
                                          })?;
    let keys = collect(keys, location)?.iter()
                                       .map(|key| MapKey::from_value(key, location))
                                       .collect::<EvalResult<Vec<_>>>()?;

    let rows = text.as_str(location)?
                   .lines()
                   .map(str::trim)
                   .filter(|line| !line.is_empty())
                   .map(|line| {
                       let mut columns = delimiter.split(line);
                       let row = keys.iter()
                                     .map(|key| (key.clone(), columns.next().map_or(Value::Nil, Value::from)))
                                     .collect::<BTreeMap<_, _>>();
                       Value::from(row)
                   })
                   .collect::<Vec<_>>();

    Ok(Value::from(rows))
}

/// `(Parse.json text)`: JSON objects become maps, arrays become arrays.
fn json(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let text = args[0].as_str(location)?;
    let parsed: serde_json::Value = serde_json::from_str(text).map_err(|e| RuntimeError::InvalidArgument { details:
                                                                                                             format!("invalid JSON: {e}"),
                                                                                                         location })?;
    Ok(from_json(parsed))
}

fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Nil, Value::Number),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::from(items.into_iter().map(from_json).collect::<Vec<_>>()),
        serde_json::Value::Object(entries) => {
            Value::from(entries.into_iter()
                               .map(|(key, value)| (MapKey::String(key), from_json(value)))
                               .collect::<BTreeMap<_, _>>())
        },
    }
}

/// `(Parse.number text)`: parses a number, ignoring surrounding whitespace.
fn number(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let text = args[0].as_str(location)?.trim();
    text.parse()
        .map(Value::Number)
        .map_err(|_| RuntimeError::InvalidArgument { details: format!("not a number: '{text}'"),
                                                     location })
}
