use crate::{
    ast::{Expr, Location},
    error::ParseError,
    interpreter::{desugar::core::Pass, parser::core::ParseResult},
};

/// Rewrites member access into calls to `get` and `set`.
///
/// - `(.a.b $obj)` becomes `(get $obj "a" "b")`.
/// - `(.a.b $obj value)` becomes `(set $obj "a" "b" value)`.
/// - A dotted command or variable such as `Array.map` or `$user.name` becomes
///   `(get Array "map")` or `(get $user "name")`.
///
/// Every segment of a dotted variable must be non-empty, so `$.x` and `$a.`
/// are errors. Command names containing `/` are paths (`./run.sh`,
/// `../bin/tool`) and are never rewritten. Plain argument words such as
/// `notes.txt` are not commands and are left alone as well.
pub struct DotAccess;

impl Pass for DotAccess {
    fn name(&self) -> &'static str {
        "dot access"
    }

    fn visit(&self, expr: &mut Expr) -> ParseResult<()> {
        match expr {
            Expr::Call { body, location } => rewrite_field_access(body, *location),
            Expr::Command { name, location } if is_dotted_name(name) => {
                *expr = member_chain(name, *location)?;
                Ok(())
            },
            Expr::Variable { name, location } if name.contains('.') => {
                *expr = member_chain(name, *location)?;
                Ok(())
            },
            _ => Ok(()),
        }
    }
}

/// Handles a call whose head is `.field` or `.field.nested`.
fn rewrite_field_access(body: &mut Vec<Expr>, location: Location) -> ParseResult<()> {
    let Some(Expr::Command { name, location: head_location }) = body.first() else {
        return Ok(());
    };
    let Some(path) = name.strip_prefix('.') else {
        return Ok(());
    };
    if path.is_empty() || name.contains('/') {
        return Ok(());
    }

    let head_location = *head_location;
    let fields = segments(path, name, head_location)?.into_iter()
                                                    .map(|field| {
                                                        Expr::quoted(field, head_location)
                                                    })
                                                    .collect::<Vec<_>>();

    let mut args = body.split_off(1);
    let function = match args.len() {
        1 => "get",
        2 => "set",
        found => return Err(ParseError::DotAccessArity { found, location }),
    };
    let value = if args.len() == 2 { args.pop() } else { None };
    let object = args.remove(0);

    body.clear();
    body.push(Expr::variable(function, location));
    body.push(object);
    body.extend(fields);
    body.extend(value);

    Ok(())
}

/// Builds `(get head "a" "b")` from `head.a.b`.
fn member_chain(name: &str, location: Location) -> ParseResult<Expr> {
    let mut parts = segments(name, name, location)?.into_iter();
    let head = parts.next().unwrap_or_default();

    let mut body = vec![Expr::variable("get", location), Expr::variable(head, location)];
    body.extend(parts.map(|part| Expr::quoted(part, location)));

    Ok(Expr::call(body, location))
}

/// A command name like `Array.map`: contains a dot, does not start with one and is not
/// a path.
fn is_dotted_name(name: &str) -> bool {
    name.contains('.') && !name.starts_with('.') && !name.contains('/')
}

/// Splits a dotted path, rejecting empty segments.
fn segments<'a>(path: &'a str, full: &str, location: Location) -> ParseResult<Vec<&'a str>> {
    let parts = path.split('.').collect::<Vec<_>>();
    if parts.iter().any(|part| part.is_empty()) {
        return Err(ParseError::EmptyPathSegment { path: full.to_string(),
                                                  location });
    }
    Ok(parts)
}
