use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    ast::{LiteralValue, Location},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{function::Function, sequence::Sequence},
    },
    util::num::format_number,
};

/// The contents of a map value, ordered by key.
pub type MapEntries = BTreeMap<MapKey, Value>;

/// Represents a runtime value in the interpreter.
///
/// Arrays are immutable and shared. Maps are shared and mutable through `set`,
/// so every holder of a map sees the write. Sequences are lazy and single-pass.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent value. Unbound variables evaluate to it.
    Nil,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string. External commands produce their standard output as one.
    String(String),
    /// An ordered sequence of values.
    Array(Rc<Vec<Self>>),
    /// A mapping with unique keys, ordered by key.
    Map(Rc<RefCell<MapEntries>>),
    /// A lazy, possibly unbounded, sequence.
    Sequence(Sequence),
    /// Something that can be called.
    Function(Rc<Function>),
}

/// A value usable as a map key.
///
/// Only scalar values can be keys; numbers are ordered through
/// [`OrderedFloat`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    /// `null` as a key.
    Nil,
    /// A boolean key.
    Bool(bool),
    /// A numeric key.
    Number(OrderedFloat<f64>),
    /// A string key.
    String(String),
}

impl MapKey {
    /// Converts a value to a key.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeError` for arrays, maps, sequences and
    /// functions.
    pub fn from_value(value: &Value, location: Location) -> EvalResult<Self> {
        match value {
            Value::Nil => Ok(Self::Nil),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => Ok(Self::Number(OrderedFloat(*n))),
            Value::String(s) => Ok(Self::String(s.clone())),
            other => Err(RuntimeError::TypeError { expected: "map key",
                                                   found: other.type_name(),
                                                   location }),
        }
    }

    /// Converts the key back to a value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Nil => Value::Nil,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.into_inner()),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<&str> for MapKey {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<MapEntries> for Value {
    fn from(v: MapEntries) -> Self {
        Self::Map(Rc::new(RefCell::new(v)))
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Self::Function(Rc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(v: &LiteralValue) -> Self {
        match v {
            LiteralValue::String(s) => Self::String(s.clone()),
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Null => Self::Nil,
        }
    }
}

impl Value {
    /// The name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Sequence(_) => "sequence",
            Self::Function(_) => "function",
        }
    }

    /// Whether the value counts as true in a condition.
    ///
    /// `null`, `false`, `0`, `NaN` and the empty string are false; everything
    /// else is true.
    ///
    /// # Example
    /// ```
    /// use lish::interpreter::value::core::Value;
    ///
    /// assert!(Value::from("x").is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::Nil.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Whether the value is `null`.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `location`: Source location for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If value is a number.
    /// - `Err(RuntimeError::TypeError)`: Otherwise.
    pub fn as_number(&self, location: Location) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::TypeError { expected: "number",
                                                   found: other.type_name(),
                                                   location }),
        }
    }

    /// Borrows the value as a string, or returns an error if it is not one.
    pub fn as_str(&self, location: Location) -> EvalResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(RuntimeError::TypeError { expected: "string",
                                                   found: other.type_name(),
                                                   location }),
        }
    }

    /// Borrows the value as a function, or returns an error if it is not one.
    pub fn as_function(&self, location: Location) -> EvalResult<&Rc<Function>> {
        match self {
            Self::Function(f) => Ok(f),
            other => Err(RuntimeError::TypeError { expected: "function",
                                                   found: other.type_name(),
                                                   location }),
        }
    }

    /// Borrows the value as a map, or returns an error if it is not one.
    pub fn as_map(&self, location: Location) -> EvalResult<&Rc<RefCell<MapEntries>>> {
        match self {
            Self::Map(m) => Ok(m),
            other => Err(RuntimeError::TypeError { expected: "map",
                                                   found: other.type_name(),
                                                   location }),
        }
    }

    /// The text passed to an external program for this value.
    ///
    /// Strings are passed verbatim; everything else uses its display form.
    #[must_use]
    pub fn to_argument(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Writes the value as it appears nested inside an array or map, with
    /// strings quoted.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b) || a == b,
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Sequence(a), Self::Sequence(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    value.fmt_nested(f)?;
                }

                write!(f, "]")
            },
            Self::Map(m) => {
                write!(f, "{{")?;

                for (index, (key, value)) in m.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    key.to_value().fmt_nested(f)?;
                    write!(f, ": ")?;
                    value.fmt_nested(f)?;
                }

                write!(f, "}}")
            },
            Self::Sequence(_) => write!(f, "<sequence>"),
            Self::Function(function) => write!(f, "{function}"),
        }
    }
}
