//! # lish
//!
//! lish is a small shell language written in Rust. Programs are S-expressions;
//! a call resolves to a special form, a built-in or a user function when one is
//! bound under the head's name, and runs the external program of that name
//! otherwise. Pipes (`|`, `|>`), sequencing (`;`) and member access (`.name`)
//! are rewritten into plain calls before evaluation.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::error::Error;

use crate::{interpreter::value::core::Value, session::Session};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser,
/// rewritten in place by the desugaring passes and walked by the evaluator.
///
/// # Responsibilities
/// - Defines the expression kinds of the language.
/// - Attaches source locations to every node for error reporting.
/// - Renders nodes back into surface syntax.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// desugaring or evaluating code. Every error carries the location it refers
/// to, and its message ends in `at <line>:<column>`.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator, processes).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, desugaring, evaluation, scopes,
/// values and external programs.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive loop.
///
/// Line editing and history, `$resultN` bindings and `/`-prefixed
/// meta-commands.
pub mod repl;
/// Evaluation sessions.
///
/// A session owns the interpreter, the core library scope and the module scope
/// that definitions are written to.
pub mod session;
/// General utilities for safe numeric conversion and helpers.
///
/// # Responsibilities
/// - Safely convert between `f64` and `usize` without silent data loss.
/// - Format numbers the way the language prints them.
pub mod util;

/// Evaluates a script in a fresh session started in the current directory.
///
/// When `auto_print` is set, the value of the script is printed unless it is
/// `null`.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use lish::get_result;
///
/// // Simple expression: the result will be calculated and no error should occur.
/// let res = get_result("(let [$x 2] (* $x $x))", false);
/// assert!(res.is_ok());
///
/// // Example with an intentional error (numbers cannot be called).
/// let res = get_result("(1 2)", false);
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<(), Box<dyn Error>> {
    let value = get_value(source)?;
    if auto_print && !value.is_nil() {
        println!("{value}");
    }
    Ok(())
}

/// Evaluates a script in a fresh session started in the current directory and
/// returns its value.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
pub fn get_value(source: &str) -> Result<Value, Box<dyn Error>> {
    Session::with_process_shell(std::env::current_dir()?).eval(source)
}
