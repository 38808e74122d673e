use crate::{
    ast::Expr,
    interpreter::{
        desugar::{
            command::CommandClassification, dot_access::DotAccess, flatten::SequenceFlattening,
            pipe::PipeRewrite,
        },
        parser::core::ParseResult,
    },
};

/// A whole-tree rewrite applied before evaluation.
///
/// `visit` is called once per node, pre-order. It may replace the node it is
/// given (or the node's body) in place; the walk then continues into whatever
/// children the node has after the rewrite.
pub trait Pass {
    /// Name used in traces.
    fn name(&self) -> &'static str;

    /// Rewrites a single node.
    ///
    /// # Errors
    /// Returns a `ParseError` when the node is malformed for this pass.
    fn visit(&self, expr: &mut Expr) -> ParseResult<()>;
}

/// The desugaring passes, in the order they run.
pub const PASSES: &[&dyn Pass] =
    &[&CommandClassification, &PipeRewrite, &DotAccess, &SequenceFlattening];

/// Runs every pass over the tree.
///
/// Running the passes a second time over their own output changes nothing.
///
/// # Errors
/// Propagates the first error raised by a pass.
///
/// # Example
/// ```
/// use lish::interpreter::{desugar::core::desugar, lexer::lex, parser::core::parse_program};
///
/// let mut program = parse_program(&lex("(ls -la | Parse.lines)").unwrap()).unwrap();
/// desugar(&mut program).unwrap();
///
/// assert_eq!(program.to_string(), r#"(($get $Parse "lines") (ls -la))"#);
/// ```
pub fn desugar(expr: &mut Expr) -> ParseResult<()> {
    for pass in PASSES {
        tracing::trace!(pass = pass.name(), "running desugaring pass");
        walk(*pass, expr)?;
    }
    Ok(())
}

/// Visits `expr` and then every node below it, pre-order.
///
/// # Errors
/// Propagates the first error raised by `pass`.
pub fn walk(pass: &dyn Pass, expr: &mut Expr) -> ParseResult<()> {
    pass.visit(expr)?;

    match expr {
        Expr::Call { body, .. } | Expr::ArrayLiteral { body, .. } | Expr::MapLiteral { body, .. } => {
            for child in body {
                walk(pass, child)?;
            }
        },
        Expr::Value { .. } | Expr::Command { .. } | Expr::Variable { .. } => {},
    }

    Ok(())
}
