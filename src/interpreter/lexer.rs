use logos::{Lexer, Logos, Skip};

use crate::{ast::Location, error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Bare words stay ambiguous here: whether `ls` is a call head, an identifier
/// or a plain string is decided later by the parser and the desugaring passes.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `;`, the sequencing operator.
    #[token(";")]
    Semicolon,
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `null`
    #[token("null")]
    Null,
    /// Numeric literal tokens, such as `42`, `-3.5` or `2e10`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_number, priority = 3)]
    Number(f64),
    /// Variable references, `$name`. The `$` is not part of the value.
    #[regex(r#"\$[^\s()\[\]{}"';]+"#, |lex| lex.slice()[1..].to_string())]
    Variable(String),
    /// Quoted strings. Double quotes process escapes, single quotes are taken
    /// literally.
    #[regex(r#""([^"\\]|\\(.|\n))*""#, parse_double_quoted)]
    #[regex(r"'[^']*'", |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    Quoted(String),
    /// A quote that runs to the end of the input.
    #[regex(r#""([^"\\]|\\(.|\n))*"#)]
    #[regex(r"'[^']*")]
    UnterminatedString,
    /// Bare words: `ls`, `-la`, `|`, `Array.map`, `.name`.
    #[regex(r#"[^\s()\[\]{}"';$#][^\s()\[\]{}"';]*"#, |lex| lex.slice().to_string())]
    Word(String),
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// Line breaks; only used to keep track of locations.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset at which that line
/// starts, from which the column of every token is derived.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl LexerExtras {
    /// Extras for a fresh source, positioned at line 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Converts source text into a flat sequence of located tokens.
///
/// # Errors
/// - `UnterminatedString` when a quote is never closed.
/// - `UnexpectedToken` for text that is not a token, such as a lone `$`.
///
/// # Example
/// ```
/// use lish::interpreter::lexer::{Token, lex};
///
/// let tokens = lex("(echo $name)").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::LParen,
///                 Token::Word("echo".into()),
///                 Token::Variable("name".into()),
///                 Token::RParen]);
/// ```
pub fn lex(source: &str) -> ParseResult<Vec<(Token, Location)>> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::new());
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let location = location_of(source, &lexer.extras, span.start);

        match token {
            Ok(Token::UnterminatedString) => {
                return Err(ParseError::UnterminatedString { location });
            },
            Ok(tok) => tokens.push((tok, location)),
            Err(()) => {
                return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                         location });
            },
        }

        // Quoted strings may span lines.
        let slice = lexer.slice();
        if let Some(last) = slice.rfind('\n') {
            lexer.extras.line += slice.matches('\n').count();
            lexer.extras.line_start = span.start + last + 1;
        }
    }

    Ok(tokens)
}

/// Computes the location of the byte offset `start` on the current line.
fn location_of(source: &str, extras: &LexerExtras, start: usize) -> Location {
    let column = source.get(extras.line_start..start)
                       .map_or(1, |prefix| prefix.chars().count() + 1);
    Location::new(extras.line, column)
}

/// Records a line break and skips it.
fn newline(lex: &mut Lexer<Token>) -> Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    Skip
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid number.
fn parse_number(lex: &mut Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the quotes from a double-quoted string and processes escapes.
///
/// Unknown escapes are kept as written, backslash included.
fn parse_double_quoted(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(c @ ('\\' | '"' | '$')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }

    out
}
