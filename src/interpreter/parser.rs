/// Core recursive-descent parsing.
///
/// Contains the program entry point and the expression dispatcher that turns
/// tokens into call forms, array and map literals, values and variables.
pub mod core;

/// Utility functions for the parser.
///
/// Provides the shared routine that collects the body of a bracketed form.
pub mod utils;
