/// The desugaring passes rewrite the parsed tree before evaluation.
///
/// Four passes run in a fixed order over the whole tree, each rewriting
/// matching nodes in place: command classification, pipe rewriting, dot
/// access and sequence flattening. After them, the tree only contains forms
/// the evaluator understands directly.
pub mod desugar;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the desugared tree, resolves names through the scope
/// chain and dispatches calls either to functions or to external programs.
///
/// # Responsibilities
/// - Evaluates every expression kind.
/// - Applies the macro, library and user calling conventions.
/// - Reports runtime errors with the location they occurred at.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of located
/// tokens: structural symbols, literals, variables, quoted strings and bare
/// words. Bare words stay ambiguous until the desugaring passes decide what
/// they are.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line and column.
/// - Processes escapes in double-quoted strings.
/// - Reports unterminated strings and stray characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into call forms, array and map literals and leaves.
/// - Reports unbalanced brackets and odd map literals with their location.
pub mod parser;
/// Chained variable scopes and the module scope.
pub mod scope;
/// Execution of external programs.
///
/// Declares the `Shell` trait the evaluator runs commands through, and
/// `ProcessShell`, which spawns real child processes.
pub mod shell;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements truthiness, conversions, equality and display.
/// - Defines function values and lazy sequences.
pub mod value;
