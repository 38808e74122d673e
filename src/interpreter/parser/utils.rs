use std::iter::Peekable;

use crate::{
    ast::{Expr, Location},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses expressions until a closing token.
///
/// This utility is shared by call forms, array literals and map literals. The
/// opening token has already been consumed; the closing one is consumed here.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening bracket.
/// - `closing`: The token that terminates the form.
/// - `form`: Name of the form, for the unterminated error.
/// - `end`: Location of the last token in the input.
///
/// # Errors
/// Returns `ParseError::Unterminated` at `end` if the input runs out before
/// `closing` is found, or any error from parsing an element.
pub(in crate::interpreter::parser) fn parse_delimited<'a, I>(tokens: &mut Peekable<I>,
                                                             closing: &Token,
                                                             form: &'static str,
                                                             end: Location)
                                                             -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, Location)>
{
    let mut body = Vec::new();

    loop {
        match tokens.peek() {
            None => return Err(ParseError::Unterminated { form, location: end }),
            Some((tok, _)) if tok == closing => {
                tokens.next();
                return Ok(body);
            },
            Some(_) => body.push(parse_expression(tokens, end)?),
        }
    }
}
