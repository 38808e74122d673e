use crate::{
    ast::Expr,
    interpreter::{desugar::core::Pass, parser::core::ParseResult},
};

/// Merges sequences nested inside sequences into one flat `do`.
///
/// `a ; b ; c` first becomes `(do (do a b) c)`; this pass turns that into
/// `(do a b c)` so long chains do not nest arbitrarily deep. Only sequences
/// produced by `;` (headed by the `do` variable) are merged; a user's own
/// `(do ...)` call is left as written.
pub struct SequenceFlattening;

impl Pass for SequenceFlattening {
    fn name(&self) -> &'static str {
        "sequence flattening"
    }

    fn visit(&self, expr: &mut Expr) -> ParseResult<()> {
        if !is_sequence(expr) {
            return Ok(());
        }
        if let Expr::Call { body, .. } = expr {
            let mut items = std::mem::take(body).into_iter();
            let mut flat = Vec::new();
            flat.extend(items.next());
            flatten_into(&mut flat, items);
            *body = flat;
        }
        Ok(())
    }
}

/// Whether `expr` is a `(do ...)` sequence produced by `;`.
#[must_use]
pub fn is_sequence(expr: &Expr) -> bool {
    matches!(expr, Expr::Call { body, .. }
             if matches!(body.first(), Some(Expr::Variable { name, .. }) if name == "do"))
}

fn flatten_into(out: &mut Vec<Expr>, items: impl Iterator<Item = Expr>) {
    for item in items {
        if is_sequence(&item)
           && let Expr::Call { body, .. } = item
        {
            flatten_into(out, body.into_iter().skip(1));
        } else {
            out.push(item);
        }
    }
}
