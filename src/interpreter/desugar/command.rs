use crate::{
    ast::Expr,
    interpreter::{desugar::core::Pass, parser::core::ParseResult},
};

/// Marks the bare-word head of every call form as a command.
///
/// After this pass, `(ls -la)` has a `Command` head while `-la` stays a plain
/// value. Only the head is touched: quoted heads, numbers and nested forms are
/// left alone.
pub struct CommandClassification;

impl Pass for CommandClassification {
    fn name(&self) -> &'static str {
        "command classification"
    }

    fn visit(&self, expr: &mut Expr) -> ParseResult<()> {
        if let Expr::Call { body, .. } = expr {
            classify_head(body);
        }
        Ok(())
    }
}

/// Turns the first element of a call body into a `Command` if it is a bare
/// word.
pub(in crate::interpreter::desugar) fn classify_head(body: &mut [Expr]) {
    if let Some(first) = body.first_mut()
       && let Some(word) = first.bare_word()
    {
        *first = Expr::Command { name:     word.to_string(),
                                 location: first.location(), };
    }
}
