use std::collections::BTreeMap;

use crate::{
    ast::Location,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{
            core::{MapKey, Value},
            function::Arity,
        },
    },
};

library_functions! {
    "echo" => { arity: Arity::AtLeast(0), func: echo },
    "cwd"  => { arity: Arity::Exact(0), func: |interpreter, _, _| Ok(Value::String(interpreter.cwd().display().to_string())) },
    "cd"   => { arity: Arity::Exact(1), func: cd },
    "env"  => { arity: Arity::Range(0, 1), func: env },
}

/// Prints the arguments separated by spaces and returns `null`.
fn echo(_: &Interpreter, args: &[Value], _: Location) -> EvalResult<Value> {
    let line = args.iter().map(Value::to_argument).collect::<Vec<_>>();
    println!("{}", line.join(" "));
    Ok(Value::Nil)
}

/// Changes the working directory and returns the new one.
///
/// # Errors
/// `Io` if the target does not exist or is not a directory.
fn cd(interpreter: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let target = interpreter.resolve_path(args[0].as_str(location)?);
    let io_error = |details: String| RuntimeError::Io { path: target.display().to_string(),
                                                        details,
                                                        location };

    let metadata = std::fs::metadata(&target).map_err(|e| io_error(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(io_error("not a directory".into()));
    }

    let target = target.canonicalize().map_err(|e| io_error(e.to_string()))?;
    tracing::debug!(cwd = %target.display(), "changing directory");
    interpreter.set_cwd(target.clone());
    Ok(Value::String(target.display().to_string()))
}

/// `(IO.env name)` reads one variable (`null` when unset); `(IO.env)` returns
/// the whole environment as a map.
fn env(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    match args.first() {
        Some(name) => Ok(std::env::var(name.as_str(location)?).map_or(Value::Nil, Value::String)),
        None => Ok(Value::from(std::env::vars().map(|(key, value)| (MapKey::String(key), Value::String(value)))
                                               .collect::<BTreeMap<_, _>>())),
    }
}
