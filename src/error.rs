/// Parsing errors.
///
/// Defines all error types that can occur during lexing, parsing and
/// desugaring of source code. Parse errors are always fatal to the current
/// evaluation; nothing is evaluated once one is raised.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: argument
/// count and type mismatches, dispatch failures and external process failures.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
