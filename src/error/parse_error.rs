use crate::ast::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing, parsing or desugaring.
///
/// Every message is rendered as `<message> at <line>:<column>`.
pub enum ParseError {
    /// Found a character sequence that is not a token.
    UnexpectedToken {
        /// The offending text.
        token:    String,
        /// Where it was found.
        location: Location,
    },
    /// A quoted string was never closed.
    UnterminatedString {
        /// Location of the opening quote.
        location: Location,
    },
    /// The input ended while a `(`, `[` or `{` form was still open.
    Unterminated {
        /// Which form was left open.
        form:     &'static str,
        /// End-of-input location.
        location: Location,
    },
    /// A closing bracket without a matching opening one.
    UnexpectedClosing {
        /// The closing character.
        token:    char,
        /// Where it was found.
        location: Location,
    },
    /// `()` has no head to call.
    EmptyCall {
        /// Location of the opening parenthesis.
        location: Location,
    },
    /// A map literal with an odd number of elements.
    OddMapLiteral {
        /// The number of elements found.
        found:    usize,
        /// Location of the opening brace.
        location: Location,
    },
    /// A pipe or sequence operator with nothing on one side.
    MissingPipeOperand {
        /// The operator, one of `|`, `|>` or `;`.
        operator: String,
        /// Location of the operator.
        location: Location,
    },
    /// `(.field ...)` with neither one nor two arguments.
    DotAccessArity {
        /// The number of arguments given.
        found:    usize,
        /// Location of the call form.
        location: Location,
    },
    /// A dotted path with an empty segment, e.g. `Array..map`.
    EmptyPathSegment {
        /// The full dotted path.
        path:     String,
        /// Location of the token.
        location: Location,
    },
}

impl ParseError {
    /// Location the error refers to.
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::UnexpectedToken { location, .. }
            | Self::UnterminatedString { location }
            | Self::Unterminated { location, .. }
            | Self::UnexpectedClosing { location, .. }
            | Self::EmptyCall { location }
            | Self::OddMapLiteral { location, .. }
            | Self::MissingPipeOperand { location, .. }
            | Self::DotAccessArity { location, .. }
            | Self::EmptyPathSegment { location, .. } => *location,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, location } => {
                write!(f, "Unexpected token '{token}' at {location}")
            },
            Self::UnterminatedString { location } => {
                write!(f, "Unterminated string at {location}")
            },
            Self::Unterminated { form, location } => write!(f, "Unterminated {form} at {location}"),
            Self::UnexpectedClosing { token, location } => {
                write!(f, "Unexpected '{token}' without a matching opening bracket at {location}")
            },
            Self::EmptyCall { location } => write!(f, "Empty call form at {location}"),
            Self::OddMapLiteral { found, location } => write!(f,
                                                               "Map literal must have an even number of values to form key -> value pairs: found {found} at {location}"),
            Self::MissingPipeOperand { operator, location } => write!(f,
                                                                      "Operator '{operator}' needs an expression on both sides at {location}"),
            Self::DotAccessArity { found, location } => write!(f,
                                                               ". access takes between 1 and 2 arguments: found {found} at {location}"),
            Self::EmptyPathSegment { path, location } => {
                write!(f, "Expected non-empty member name in '{path}' at {location}")
            },
        }
    }
}

impl std::error::Error for ParseError {}
