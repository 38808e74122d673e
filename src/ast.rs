use std::fmt;

/// A position in the source text.
///
/// Both `line` and `column` are 1-based. Locations are attached to every token
/// and every expression node and are never changed once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// Line number in the source code.
    pub line:   usize,
    /// Column (in characters) within the line.
    pub column: usize,
}

impl Location {
    /// Creates a location from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constants that can appear directly in source
/// code: strings (quoted or bare words), numbers, booleans and `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A string, either quoted or a bare word.
    String(String),
    /// A double precision number.
    Number(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// The `null` literal.
    Null,
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// An abstract syntax tree (AST) node.
///
/// The parser only ever produces `Call`, `ArrayLiteral`, `MapLiteral`, `Value`
/// and `Variable` nodes. `Command` nodes are introduced by the desugaring passes,
/// which rewrite nodes in place before evaluation starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A call form, `(head arg...)`.
    Call {
        /// Head followed by the arguments.
        body:     Vec<Self>,
        /// Location of the opening parenthesis.
        location: Location,
    },
    /// An array literal, `[a b c]`.
    ArrayLiteral {
        /// Elements of the array.
        body:     Vec<Self>,
        /// Location of the opening bracket.
        location: Location,
    },
    /// A map literal, `{k v k v}`. The body is a flat list of key/value pairs.
    MapLiteral {
        /// Keys and values, alternating.
        body:     Vec<Self>,
        /// Location of the opening brace.
        location: Location,
    },
    /// A literal value.
    Value {
        /// The constant value.
        value:    LiteralValue,
        /// Whether the value came from a quoted string.
        quoted:   bool,
        /// Location of the token.
        location: Location,
    },
    /// An unquoted call head, resolved through the scope before being treated
    /// as the name of an external program.
    Command {
        /// The text of the head.
        name:     String,
        /// Location of the token.
        location: Location,
    },
    /// Reference to a variable by name (`$name` in source).
    Variable {
        /// Name of the variable, without the `$`.
        name:     String,
        /// Location of the token.
        location: Location,
    },
}

impl Expr {
    /// Gets the location of `self`.
    /// ## Example
    /// ```
    /// use lish::ast::{Expr, Location};
    ///
    /// let expr = Expr::Variable { name:     "x".to_string(),
    ///                             location: Location::new(5, 2), };
    ///
    /// assert_eq!(expr.location(), Location::new(5, 2));
    /// ```
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::Call { location, .. }
            | Self::ArrayLiteral { location, .. }
            | Self::MapLiteral { location, .. }
            | Self::Value { location, .. }
            | Self::Command { location, .. }
            | Self::Variable { location, .. } => *location,
        }
    }

    /// A short name for the node kind, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Call { .. } => "call",
            Self::ArrayLiteral { .. } => "array",
            Self::MapLiteral { .. } => "map",
            Self::Value { .. } => "value",
            Self::Command { .. } => "command",
            Self::Variable { .. } => "variable",
        }
    }

    /// Returns the text of an unquoted string value, i.e. a bare word.
    #[must_use]
    pub fn bare_word(&self) -> Option<&str> {
        match self {
            Self::Value { value: LiteralValue::String(s),
                          quoted: false,
                          .. } => Some(s),
            _ => None,
        }
    }

    /// Builds a call form.
    #[must_use]
    pub const fn call(body: Vec<Self>, location: Location) -> Self {
        Self::Call { body, location }
    }

    /// Builds a variable reference.
    #[must_use]
    pub fn variable(name: &str, location: Location) -> Self {
        Self::Variable { name: name.to_string(),
                         location }
    }

    /// Builds a quoted string value.
    #[must_use]
    pub fn quoted(text: &str, location: Location) -> Self {
        Self::Value { value: LiteralValue::String(text.to_string()),
                      quoted: true,
                      location }
    }
}

/// Renders the node back into surface syntax.
///
/// Quoted strings are re-escaped, so lexing the output of a literal yields the
/// same value again.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, body: &[Expr]) -> fmt::Result {
            for (index, expr) in body.iter().enumerate() {
                if index > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{expr}")?;
            }
            Ok(())
        }

        match self {
            Self::Call { body, .. } => {
                write!(f, "(")?;
                join(f, body)?;
                write!(f, ")")
            },
            Self::ArrayLiteral { body, .. } => {
                write!(f, "[")?;
                join(f, body)?;
                write!(f, "]")
            },
            Self::MapLiteral { body, .. } => {
                write!(f, "{{")?;
                join(f, body)?;
                write!(f, "}}")
            },
            Self::Value { value, quoted, .. } => match value {
                LiteralValue::String(s) if *quoted => write!(f, "\"{}\"", escape(s)),
                LiteralValue::String(s) => write!(f, "{s}"),
                LiteralValue::Number(n) => write!(f, "{n}"),
                LiteralValue::Bool(b) => write!(f, "{b}"),
                LiteralValue::Null => write!(f, "null"),
            },
            Self::Command { name, .. } => write!(f, "{name}"),
            Self::Variable { name, .. } => write!(f, "${name}"),
        }
    }
}

/// Escapes a string so it can be placed between double quotes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '$' => out.push_str("\\$"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out
}
