use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, Location},
    error::ParseError,
    interpreter::{lexer::Token, parser::utils::parse_delimited},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// A program is a sequence of expressions. A single expression that is not a
/// bare word is returned as-is. Anything else, including a lone bare word such
/// as `ls`, is wrapped into one call form so that it runs as a command rather
/// than evaluating to a string.
///
/// # Parameters
/// - `tokens`: The located tokens produced by the lexer.
///
/// # Returns
/// The root expression. An empty program yields an empty call form.
///
/// # Example
/// ```
/// use lish::{
///     ast::Expr,
///     interpreter::{lexer::lex, parser::core::parse_program},
/// };
///
/// let tokens = lex("ls").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert!(matches!(program, Expr::Call { ref body, .. } if body.len() == 1));
/// ```
pub fn parse_program(tokens: &[(Token, Location)]) -> ParseResult<Expr> {
    let end = tokens.last()
                    .map_or_else(|| Location::new(1, 1), |(_, location)| *location);
    let mut iter = tokens.iter().peekable();
    let mut body = Vec::new();

    while iter.peek().is_some() {
        body.push(parse_expression(&mut iter, end)?);
    }

    if body.len() == 1
       && body[0].bare_word().is_none()
       && let Some(only) = body.pop()
    {
        return Ok(only);
    }

    let location = body.first().map_or_else(|| Location::new(1, 1), Expr::location);
    Ok(Expr::Call { body, location })
}

/// Parses a single expression.
///
/// Grammar:
/// ```text
///     expression := "(" expression+ ")"
///                 | "[" expression* "]"
///                 | "{" (expression expression)* "}"
///                 | word | quoted | number | literal | variable | ";"
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an expression.
/// - `end`: Location of the last token, used for end-of-input errors.
///
/// # Errors
/// - `EmptyCall` for `()`.
/// - `OddMapLiteral` for a map literal with a dangling key.
/// - `UnexpectedClosing` for a closing bracket with nothing open.
/// - `Unterminated` when the input ends inside a form.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, end: Location) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Location)>
{
    let Some((token, location)) = tokens.next() else {
        return Err(ParseError::Unterminated { form:     "expression",
                                              location: end, });
    };
    let location = *location;

    match token {
        Token::LParen => {
            let body = parse_delimited(tokens, &Token::RParen, "call form", end)?;
            if body.is_empty() {
                return Err(ParseError::EmptyCall { location });
            }
            Ok(Expr::Call { body, location })
        },
        Token::LBracket => {
            let body = parse_delimited(tokens, &Token::RBracket, "array literal", end)?;
            Ok(Expr::ArrayLiteral { body, location })
        },
        Token::LBrace => {
            let body = parse_delimited(tokens, &Token::RBrace, "map literal", end)?;
            if body.len() % 2 == 1 {
                return Err(ParseError::OddMapLiteral { found: body.len(),
                                                       location });
            }
            Ok(Expr::MapLiteral { body, location })
        },
        Token::RParen => Err(ParseError::UnexpectedClosing { token: ')', location }),
        Token::RBracket => Err(ParseError::UnexpectedClosing { token: ']', location }),
        Token::RBrace => Err(ParseError::UnexpectedClosing { token: '}', location }),
        Token::Semicolon => Ok(value(LiteralValue::from(";"), false, location)),
        Token::Bool(b) => Ok(value(LiteralValue::Bool(*b), false, location)),
        Token::Null => Ok(value(LiteralValue::Null, false, location)),
        Token::Number(n) => Ok(value(LiteralValue::Number(*n), false, location)),
        Token::Quoted(s) => Ok(value(LiteralValue::String(s.clone()), true, location)),
        Token::Word(s) => Ok(value(LiteralValue::String(s.clone()), false, location)),
        Token::Variable(name) => Ok(Expr::Variable { name: name.clone(),
                                                     location }),
        other => Err(ParseError::UnexpectedToken { token: format!("{other:?}"),
                                                   location }),
    }
}

const fn value(value: LiteralValue, quoted: bool, location: Location) -> Expr {
    Expr::Value { value,
                  quoted,
                  location }
}
