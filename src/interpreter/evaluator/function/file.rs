use std::path::Path;

use crate::{
    ast::Location,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, function::Arity},
    },
};

library_functions! {
    "read"   => { arity: Arity::Exact(1), func: read },
    "write"  => { arity: Arity::Exact(2), func: write },
    "exists" => { arity: Arity::Exact(1), func: |interpreter, args, loc| Ok(Value::Bool(interpreter.resolve_path(args[0].as_str(loc)?).exists())) },
    "list"   => { arity: Arity::Range(0, 1), func: list },
}

fn io_error(path: &Path, error: &std::io::Error, location: Location) -> RuntimeError {
    RuntimeError::Io { path: path.display().to_string(),
                       details: error.to_string(),
                       location }
}

fn read(interpreter: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let path = interpreter.resolve_path(args[0].as_str(location)?);
    std::fs::read_to_string(&path).map(Value::String)
                                  .map_err(|e| io_error(&path, &e, location))
}

/// `(File.write path contents)`: replaces the file's contents. Non-string
/// contents are written in their display form.
fn write(interpreter: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let path = interpreter.resolve_path(args[0].as_str(location)?);
    std::fs::write(&path, args[1].to_argument()).map_err(|e| io_error(&path, &e, location))?;
    Ok(Value::Nil)
}

/// `(File.list [dir])`: the sorted entry names of `dir`, or of the working
/// directory.
fn list(interpreter: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let dir = match args.first() {
        Some(dir) => interpreter.resolve_path(dir.as_str(location)?),
        None => interpreter.cwd(),
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(|e| io_error(&dir, &e, location))? {
        let entry = entry.map_err(|e| io_error(&dir, &e, location))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    Ok(Value::from(names.into_iter().map(Value::String).collect::<Vec<_>>()))
}
