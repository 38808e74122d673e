use std::rc::Rc;

use crate::{
    ast::{Expr, Location},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            assertions::{
                assert_array_literal, assert_keyword, assert_variable, binding_name, check_arity,
                check_arity_min, check_arity_range,
            },
            core::{EvalResult, Interpreter},
        },
        scope::Scope,
        value::{
            core::Value,
            function::{Closure, Function, MacroFn},
        },
    },
};

/// The special forms, by name.
pub static FORMS: &[(&str, MacroFn)] = &[("def", def),
                                         ("if", if_form),
                                         ("for", for_form),
                                         ("fn", fn_form),
                                         ("defn", defn),
                                         ("let", let_form),
                                         ("delete", delete),
                                         ("and", and),
                                         ("or", or)];

/// `(def $name value)`: binds `value` in the module scope, however deeply the
/// form is nested.
fn def(interpreter: &Interpreter, args: &[Expr], scope: &Scope, location: Location) -> EvalResult<Value> {
    check_arity("def", 2, args.len(), location)?;
    let name = binding_name("def", 1, &args[0])?;
    let value = interpreter.interpret(&args[1], scope)?;
    define_in_module(name, value, scope, location)
}

fn define_in_module(name: &str, value: Value, scope: &Scope, location: Location) -> EvalResult<Value> {
    let module = scope.module_scope()
                      .ok_or(RuntimeError::NoModuleScope { location })?;
    tracing::trace!(name, "defining in module scope");
    module.define_local(name, value);
    Ok(Value::Nil)
}

/// `(if condition then [else])`: evaluates only the branch taken. A missing
/// else branch yields `null`.
fn if_form(interpreter: &Interpreter, args: &[Expr], scope: &Scope, location: Location) -> EvalResult<Value> {
    check_arity_range("if", 2, 3, args.len(), location)?;
    if interpreter.interpret(&args[0], scope)?.is_truthy() {
        interpreter.interpret(&args[1], scope)
    } else {
        args.get(2)
            .map_or(Ok(Value::Nil), |otherwise| interpreter.interpret(otherwise, scope))
    }
}

/// `(for $item in iterable body)`: evaluates `body` once per element, each
/// time in a fresh child scope, and collects the results into an array.
fn for_form(interpreter: &Interpreter, args: &[Expr], scope: &Scope, location: Location) -> EvalResult<Value> {
    check_arity("for", 4, args.len(), location)?;
    let name = assert_variable("for", 1, &args[0])?;
    assert_keyword("in", &args[1])?;

    let iterable = interpreter.interpret(&args[2], scope)?;
    let mut results = Vec::new();

    for item in iterable.iter(args[2].location())? {
        let inner = scope.child();
        inner.define_local(name, item);
        results.push(interpreter.interpret(&args[3], &inner)?);
    }

    Ok(Value::from(results))
}

/// `(fn [$a $b] body)`: a closure over the current scope.
fn fn_form(_: &Interpreter, args: &[Expr], scope: &Scope, location: Location) -> EvalResult<Value> {
    check_arity("fn", 2, args.len(), location)?;
    Ok(Value::from(Function::User(closure(None, &args[0], &args[1], scope)?)))
}

/// `(defn $name [$a $b] body)`: `fn` followed by `def`.
fn defn(_: &Interpreter, args: &[Expr], scope: &Scope, location: Location) -> EvalResult<Value> {
    check_arity("defn", 3, args.len(), location)?;
    let name = binding_name("defn", 1, &args[0])?;
    let closure = closure(Some(name.to_string()), &args[1], &args[2], scope)?;
    define_in_module(name, Value::from(Function::User(closure)), scope, location)
}

fn closure(name: Option<String>, params: &Expr, body: &Expr, scope: &Scope) -> EvalResult<Closure> {
    let params = assert_array_literal("fn", 1, params)?.iter()
                                                        .enumerate()
                                                        .map(|(index, param)| {
                                                            assert_variable("fn", index + 1, param).map(str::to_string)
                                                        })
                                                        .collect::<EvalResult<Vec<_>>>()?;
    Ok(Closure { name,
                 params,
                 body: Rc::new(body.clone()),
                 scope: scope.clone() })
}

/// `(let [$x 1] body)` or `(let [[$x 1] [$y 2]] body)`.
///
/// All pairs are bound in one new child scope, in order, so later values can
/// refer to earlier names.
fn let_form(interpreter: &Interpreter, args: &[Expr], scope: &Scope, location: Location) -> EvalResult<Value> {
    check_arity("let", 2, args.len(), location)?;
    let bindings = assert_array_literal("let", 1, &args[0])?;

    let pairs = match bindings.first() {
        None => {
            return Err(RuntimeError::InvalidArgument { details: "let needs at least one binding".into(),
                                                       location });
        },
        Some(Expr::ArrayLiteral { .. }) => {
            bindings.iter()
                    .map(|pair| assert_array_literal("let", 1, pair))
                    .collect::<EvalResult<Vec<_>>>()?
        },
        Some(_) => vec![bindings],
    };

    let inner = scope.child();
    for pair in pairs {
        check_arity("let", 2, pair.len(), location)?;
        let name = assert_variable("let", 2, &pair[0])?;
        let value = interpreter.interpret(&pair[1], &inner)?;
        inner.define_local(name, value);
    }

    interpreter.interpret(&args[1], &inner)
}

/// `(delete $a $b ...)`: removes the nearest binding of each name, up to the
/// module scope.
fn delete(_: &Interpreter, args: &[Expr], scope: &Scope, location: Location) -> EvalResult<Value> {
    check_arity_min("delete", 1, args.len(), location)?;
    for (index, arg) in args.iter().enumerate() {
        let name = assert_variable("delete", index + 1, arg)?;
        scope.remove_nearest(name);
    }
    Ok(Value::Nil)
}

/// Short-circuit `and`: stops at the first false operand and returns the last
/// operand evaluated.
fn and(interpreter: &Interpreter, args: &[Expr], scope: &Scope, _: Location) -> EvalResult<Value> {
    let mut result = Value::Bool(true);
    for arg in args {
        if !result.is_truthy() {
            break;
        }
        result = interpreter.interpret(arg, scope)?;
    }
    Ok(result)
}

/// Short-circuit `or`: stops at the first true operand and returns the last
/// operand evaluated.
fn or(interpreter: &Interpreter, args: &[Expr], scope: &Scope, _: Location) -> EvalResult<Value> {
    let mut result = Value::Bool(false);
    for arg in args {
        if result.is_truthy() {
            break;
        }
        result = interpreter.interpret(arg, scope)?;
    }
    Ok(result)
}
