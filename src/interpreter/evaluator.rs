/// Centralized argument checks.
///
/// Arity, expression-kind and keyword assertions shared by the special forms
/// and the library. Every failure carries the location of the offending
/// expression or call.
pub mod assertions;
/// Call dispatch.
///
/// Decides whether a call form invokes a function or runs an external
/// program, and implements the three calling conventions.
pub mod call;
/// Core evaluation logic.
///
/// Contains the `Interpreter`, the evaluation of every expression kind and the
/// `eval` entry point tying lexing, parsing and desugaring together.
pub mod core;
/// The core library.
///
/// Special forms, built-in functions and the namespaces installed in the
/// root scope of every session.
pub mod function;
