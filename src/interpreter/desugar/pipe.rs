use crate::{
    ast::{Expr, Location},
    error::ParseError,
    interpreter::{
        desugar::{command::classify_head, core::Pass},
        parser::core::ParseResult,
    },
};

/// The operators recognised by [`PipeRewrite`].
pub const OPERATORS: &[&str] = &["|", "|>", ";"];

/// Rewrites the rightmost pipe or sequence operator among a call's direct
/// children.
///
/// - `a b | f x` becomes `(f (a b) x)`.
/// - `a b |> f x` becomes `(f x (a b))`.
/// - `a b ; c d` becomes `(do (a b) (c d))`.
///
/// The left-hand group keeps any other operators it contains; it becomes a
/// child of the rewritten node and is rewritten when the walk reaches it. A
/// chain of operators at one level therefore groups to the left:
/// `a | f | g` is `(g (f a))`.
pub struct PipeRewrite;

impl Pass for PipeRewrite {
    fn name(&self) -> &'static str {
        "pipe rewriting"
    }

    fn visit(&self, expr: &mut Expr) -> ParseResult<()> {
        let Expr::Call { body, .. } = expr else {
            return Ok(());
        };
        let Some((index, op)) =
            body.iter()
                .enumerate()
                .rev()
                .find_map(|(index, e)| operator(e).map(|op| (index, op)))
        else {
            return Ok(());
        };

        let location = body[index].location();
        let mut right = body.split_off(index + 1);
        body.truncate(index);
        let left = std::mem::take(body);

        if left.is_empty() || right.is_empty() {
            return Err(ParseError::MissingPipeOperand { operator: op.to_string(),
                                                        location });
        }

        *body = match op {
            "|" => {
                let function = right.remove(0);
                let mut rewritten = vec![function, group(left, location)];
                rewritten.extend(right);
                rewritten
            },
            "|>" => {
                right.push(group(left, location));
                right
            },
            _ => vec![Expr::variable("do", location),
                      side(left, location),
                      side(right, location),],
        };
        classify_head(body);

        Ok(())
    }
}

/// Returns the operator text if `expr` is an unquoted pipe or sequence
/// operator.
fn operator(expr: &Expr) -> Option<&'static str> {
    let text = match expr {
        Expr::Command { name, .. } => name.as_str(),
        other => other.bare_word()?,
    };
    OPERATORS.iter().copied().find(|op| *op == text)
}

/// The piped-in expression: a single element as-is, several as a call.
fn group(mut items: Vec<Expr>, location: Location) -> Expr {
    if items.len() == 1
       && let Some(only) = items.pop()
    {
        return only;
    }
    call(items, location)
}

/// One side of `;`. Both sides must run, so a lone word becomes a call too.
fn side(mut items: Vec<Expr>, location: Location) -> Expr {
    let is_word = |e: &Expr| e.bare_word().is_some() || matches!(e, Expr::Command { .. });
    if items.len() == 1
       && !is_word(&items[0])
       && let Some(only) = items.pop()
    {
        return only;
    }
    call(items, location)
}

fn call(mut items: Vec<Expr>, location: Location) -> Expr {
    classify_head(&mut items);
    let location = items.first().map_or(location, Expr::location);
    Expr::call(items, location)
}
