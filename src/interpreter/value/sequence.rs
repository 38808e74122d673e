use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::Location,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A lazy, single-pass sequence of values.
///
/// Elements are produced on demand, so a sequence may be unbounded. Every
/// consumer pulls from the same underlying iterator: once an element has been
/// taken, no other holder of the sequence will see it again.
#[derive(Clone)]
pub struct Sequence(Rc<RefCell<Box<dyn Iterator<Item = Value>>>>);

impl Sequence {
    /// Wraps an iterator.
    pub fn new(iter: impl Iterator<Item = Value> + 'static) -> Self {
        Self(Rc::new(RefCell::new(Box::new(iter))))
    }

    /// A numeric range from `start` by `step`, stopping before `end`. With no
    /// `end` the range never stops.
    ///
    /// # Example
    /// ```
    /// use lish::interpreter::value::{core::Value, sequence::Sequence};
    ///
    /// let range = Sequence::range(0.0, Some(3.0), 1.0);
    /// let values: Vec<Value> = range.iter().collect();
    ///
    /// assert_eq!(values, vec![0.0.into(), 1.0.into(), 2.0.into()]);
    /// ```
    #[must_use]
    pub fn range(start: f64, end: Option<f64>, step: f64) -> Self {
        let numbers = std::iter::successors(Some(start), move |n| Some(n + step));
        Self::new(numbers.take_while(move |n| {
                             end.is_none_or(|end| if step > 0.0 { *n < end } else { *n > end })
                         })
                         .map(Value::Number))
    }

    /// Pulls the next element.
    #[must_use]
    pub fn pull(&self) -> Option<Value> {
        self.0.borrow_mut().next()
    }

    /// An iterator pulling from this sequence.
    #[must_use]
    pub fn iter(&self) -> SequenceIter {
        SequenceIter(self.clone())
    }

    /// Whether both handles refer to the same sequence.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence")
    }
}

/// Iterator over a [`Sequence`], pulling one element at a time.
pub struct SequenceIter(Sequence);

impl Iterator for SequenceIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.0.pull()
    }
}

impl Value {
    /// Iterates over an iterable value.
    ///
    /// Arrays yield their elements, sequences pull lazily, maps yield
    /// `[key value]` pairs and strings yield their characters.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeError` for values that cannot be iterated.
    pub fn iter(&self, location: Location) -> EvalResult<Box<dyn Iterator<Item = Self>>> {
        match self {
            Self::Array(items) => {
                let items = Rc::clone(items);
                Ok(Box::new((0..items.len()).map(move |i| items[i].clone())))
            },
            Self::Sequence(seq) => Ok(Box::new(seq.iter())),
            Self::Map(map) => {
                let pairs = map.borrow()
                               .iter()
                               .map(|(key, value)| Self::from(vec![key.to_value(), value.clone()]))
                               .collect::<Vec<_>>();
                Ok(Box::new(pairs.into_iter()))
            },
            Self::String(s) => {
                let chars = s.chars().map(|c| Self::String(c.to_string())).collect::<Vec<_>>();
                Ok(Box::new(chars.into_iter()))
            },
            other => Err(RuntimeError::TypeError { expected: "iterable",
                                                   found: other.type_name(),
                                                   location }),
        }
    }
}
