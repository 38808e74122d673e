use std::{fmt, rc::Rc};

use crate::{
    ast::{Expr, Location},
    interpreter::{
        evaluator::{
            assertions::{check_arity, check_arity_min, check_arity_range},
            core::{EvalResult, Interpreter},
        },
        scope::Scope,
        value::core::Value,
    },
};

/// A special form: receives its arguments unevaluated, together with the
/// calling scope, and decides what to evaluate and where.
pub type MacroFn = fn(&Interpreter, &[Expr], &Scope, Location) -> EvalResult<Value>;

/// A library function: receives its arguments already evaluated, left to
/// right.
pub type LibFn = fn(&Interpreter, &[Value], Location) -> EvalResult<Value>;

/// The number of arguments a library function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exact(usize),
    /// Between the two bounds, inclusive.
    Range(usize, usize),
    /// At least `n` arguments.
    AtLeast(usize),
}

impl Arity {
    /// Fails with a positioned `ArgumentCountMismatch` unless `found`
    /// arguments are acceptable.
    pub fn check(self, function: &str, found: usize, location: Location) -> EvalResult<()> {
        match self {
            Self::Exact(n) => check_arity(function, n, found, location),
            Self::Range(min, max) => check_arity_range(function, min, max, found, location),
            Self::AtLeast(n) => check_arity_min(function, n, found, location),
        }
    }
}

/// A callable value.
///
/// Calling dispatches on the variant; see
/// [`Interpreter::invoke`](crate::interpreter::evaluator::core::Interpreter::invoke).
#[derive(Debug)]
pub enum Function {
    /// A special form such as `if` or `let`.
    Macro {
        /// Name the form is installed under.
        name: &'static str,
        /// The implementation.
        func: MacroFn,
    },
    /// A built-in operating on evaluated values.
    Lib {
        /// Name the function is installed under.
        name:  &'static str,
        /// Accepted argument counts, checked before `func` runs.
        arity: Arity,
        /// The implementation.
        func:  LibFn,
    },
    /// A closure created by `fn`.
    User(Closure),
    /// A library function paired with the value it was looked up on.
    Bound(BoundMethod),
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Macro { name, .. } => write!(f, "<special form {name}>"),
            Self::Lib { name, .. } => write!(f, "<builtin {name}>"),
            Self::User(closure) => match &closure.name {
                Some(name) => write!(f, "<fn {name}>"),
                None => write!(f, "<fn>"),
            },
            Self::Bound(bound) => write!(f, "<method {}>", bound.name),
        }
    }
}

/// A user function.
///
/// The closure keeps the scope that was active where `fn` was evaluated; calls
/// bind their arguments in a fresh child of that scope, never of the caller's.
#[derive(Debug)]
pub struct Closure {
    /// The name given by `defn`, if any.
    pub name:   Option<String>,
    /// Parameter names, without `$`.
    pub params: Vec<String>,
    /// The function body.
    pub body:   Rc<Expr>,
    /// The defining scope.
    pub scope:  Scope,
}

/// A method looked up on a value, e.g. `$items.map`.
///
/// Calling it passes `receiver` as the first argument to `method`.
#[derive(Debug)]
pub struct BoundMethod {
    /// The value the method was looked up on.
    pub receiver: Value,
    /// The member name.
    pub name:     &'static str,
    /// Accepted argument counts, receiver included.
    pub arity:    Arity,
    /// The library function implementing it.
    pub method:   LibFn,
}
