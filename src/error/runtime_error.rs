use crate::ast::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// Every message is rendered as `<message> at <line>:<column>`.
pub enum RuntimeError {
    /// The wrong number of arguments was supplied to a function or form.
    ArgumentCountMismatch {
        /// The function or form name.
        function: String,
        /// What was expected, e.g. `exactly 2` or `between 2 and 3`.
        expected: String,
        /// The number of arguments found.
        found:    usize,
        /// The source location of the call.
        location: Location,
    },
    /// A form needed a `$variable` at some position.
    ExpectedVariable {
        /// The form name.
        function: String,
        /// The argument position.
        position: usize,
        /// The kind of expression found instead.
        found:    &'static str,
        /// Where the offending expression is.
        location: Location,
    },
    /// A form needed an array literal at some position.
    ExpectedArrayLiteral {
        /// The form name.
        function: String,
        /// The argument position.
        position: usize,
        /// The kind of expression found instead.
        found:    &'static str,
        /// Where the offending expression is.
        location: Location,
    },
    /// A form needed a keyword such as `in`.
    ExpectedKeyword {
        /// The keyword.
        expected: &'static str,
        /// What was found instead.
        found:    String,
        /// Where the offending expression is.
        location: Location,
    },
    /// A value had an unexpected type.
    TypeError {
        /// The expected type, e.g. `number` or `iterable`.
        expected: &'static str,
        /// The type that was found.
        found:    &'static str,
        /// The source location of the call.
        location: Location,
    },
    /// The head of a call is neither a function nor a string.
    NotCallable {
        /// The type the head evaluated to.
        found:    &'static str,
        /// The source location of the call.
        location: Location,
    },
    /// A macro was handed already-evaluated values.
    MacroApplied {
        /// The macro name.
        name:     &'static str,
        /// The source location of the call.
        location: Location,
    },
    /// `def` was used in a scope chain without a module scope.
    NoModuleScope {
        /// The source location of the call.
        location: Location,
    },
    /// The external program could not be launched.
    Spawn {
        /// The program name.
        command:  String,
        /// The underlying cause.
        details:  String,
        /// The source location of the call.
        location: Location,
    },
    /// The external program exited unsuccessfully.
    CommandFailed {
        /// The program name.
        command:  String,
        /// The exit code, if the program was not killed by a signal.
        code:     Option<i32>,
        /// The source location of the call.
        location: Location,
    },
    /// An argument was invalid or out of range.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details:  String,
        /// The source location of the call.
        location: Location,
    },
    /// An `assert` call found its condition false.
    AssertionFailed {
        /// The message given to `assert`, if any.
        message:  Option<String>,
        /// The source location of the call.
        location: Location,
    },
    /// Calls nested deeper than the interpreter allows.
    CallDepthExceeded {
        /// The maximum nesting depth.
        limit:    usize,
        /// The call that went over the limit.
        location: Location,
    },
    /// A filesystem operation failed.
    Io {
        /// The path involved.
        path:     String,
        /// The underlying cause.
        details:  String,
        /// The source location of the call.
        location: Location,
    },
}

impl RuntimeError {
    /// Location the error refers to.
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::ArgumentCountMismatch { location, .. }
            | Self::ExpectedVariable { location, .. }
            | Self::ExpectedArrayLiteral { location, .. }
            | Self::ExpectedKeyword { location, .. }
            | Self::TypeError { location, .. }
            | Self::NotCallable { location, .. }
            | Self::MacroApplied { location, .. }
            | Self::NoModuleScope { location }
            | Self::Spawn { location, .. }
            | Self::CommandFailed { location, .. }
            | Self::InvalidArgument { location, .. }
            | Self::AssertionFailed { location, .. }
            | Self::CallDepthExceeded { location, .. }
            | Self::Io { location, .. } => *location,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArgumentCountMismatch { function,
                                          expected,
                                          found,
                                          location, } => write!(f,
                                                                "{function} takes {expected} arguments: found {found} at {location}"),
            Self::ExpectedVariable { function,
                                     position,
                                     found,
                                     location, } => write!(f,
                                                           "Expected variable definition after {function} at position {position}: found {found} at {location}"),
            Self::ExpectedArrayLiteral { function,
                                         position,
                                         found,
                                         location, } => write!(f,
                                                               "Expected array definition after {function} at position {position}: found {found} at {location}"),
            Self::ExpectedKeyword { expected,
                                    found,
                                    location, } => {
                write!(f, "Expected keyword {expected}: found {found} at {location}")
            },
            Self::TypeError { expected,
                              found,
                              location, } => write!(f, "Expected {expected}: found {found} at {location}"),
            Self::NotCallable { found, location } => write!(f,
                                                            "Call target is neither a function nor a command: found {found} at {location}"),
            Self::MacroApplied { name, location } => write!(f,
                                                            "Special form '{name}' cannot be applied to evaluated arguments at {location}"),
            Self::NoModuleScope { location } => {
                write!(f, "No module scope to define into at {location}")
            },
            Self::Spawn { command,
                          details,
                          location, } => write!(f, "Failed to launch '{command}': {details} at {location}"),
            Self::CommandFailed { command,
                                  code,
                                  location, } => match code {
                Some(code) => write!(f, "Command '{command}' exited with status {code} at {location}"),
                None => write!(f, "Command '{command}' was terminated by a signal at {location}"),
            },
            Self::InvalidArgument { details, location } => {
                write!(f, "Invalid argument: {details} at {location}")
            },
            Self::AssertionFailed { message: Some(message),
                                    location, } => write!(f, "Assertion failed: {message} at {location}"),
            Self::AssertionFailed { message: None,
                                    location, } => write!(f, "Assertion failed at {location}"),
            Self::CallDepthExceeded { limit, location } => {
                write!(f, "Calls nested deeper than {limit} levels at {location}")
            },
            Self::Io { path,
                       details,
                       location, } => write!(f, "I/O error on '{path}': {details} at {location}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
