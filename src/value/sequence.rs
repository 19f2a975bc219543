//! Lazy, pull-based sequences.
//!
//! A [`Sequence`] is the dynamic counterpart of a generator: a cursor over a
//! stream of values that is only advanced when a consumer pulls the next
//! item. Pipelines built from sequence stages therefore process their input
//! one element at a time and never materialize an intermediate collection.
//!
//! Clones share the same cursor. An item pulled through one clone is gone for
//! every other holder, which mirrors how an iterator object behaves when it
//! is passed around by reference.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use super::Value;
use crate::error::CallError;

type Source = Box<dyn Iterator<Item = Result<Value, CallError>> + Send>;

/// A shared, lazily evaluated stream of values.
///
/// Items are `Result`s: a stage that fails while producing an element yields
/// an `Err`, and the consumer that pulls it propagates the error.
///
/// A stage closure that pulls from a clone of its own output receives an
/// `Err` item instead of blocking on the cursor it is already advancing.
/// Pulls from other threads wait for the cursor as usual.
///
/// # Examples
///
/// ```rust
/// use pointfree::{Sequence, Value};
///
/// let doubled = Sequence::new(vec![1_i64, 2, 3])
///     .map_values(|value| Ok(Value::Int(value.as_int().unwrap_or(0) * 2)));
///
/// let items: Result<Vec<Value>, _> = doubled.collect();
/// assert_eq!(items.unwrap(), vec![Value::Int(2), Value::Int(4), Value::Int(6)]);
/// ```
#[derive(Clone)]
pub struct Sequence {
    source: Arc<ReentrantMutex<RefCell<Source>>>,
}

impl Sequence {
    /// Creates a sequence over infallible items.
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: super::IntoValue,
        I::IntoIter: Send + 'static,
    {
        Self::from_results(
            items
                .into_iter()
                .map(|item| Ok(super::IntoValue::into_value(item))),
        )
    }

    /// Creates a sequence over items that may fail.
    pub fn from_results<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Result<Value, CallError>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            source: Arc::new(ReentrantMutex::new(RefCell::new(Box::new(items.into_iter())))),
        }
    }

    /// Creates an exhausted sequence.
    pub fn empty() -> Self {
        Self::from_results(std::iter::empty())
    }

    /// Pulls the next item.
    pub fn pull(&self) -> Option<Result<Value, CallError>> {
        let guard = self.source.lock();
        let Ok(mut source) = guard.try_borrow_mut() else {
            return Some(Err(CallError::message(
                "sequence pulled from inside one of its own stages",
            )));
        };
        source.next()
    }

    /// Lazily applies `transform` to each successful item.
    #[must_use]
    pub fn map_values<F>(self, transform: F) -> Self
    where
        F: Fn(Value) -> Result<Value, CallError> + Send + 'static,
    {
        Self::from_results(self.map(move |item| item.and_then(&transform)))
    }

    /// Lazily keeps the successful items for which `predicate` holds.
    ///
    /// Errors always pass through so the consumer sees them.
    #[must_use]
    pub fn filter_values<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, CallError> + Send + 'static,
    {
        Self::from_results(self.filter_map(move |item| match item {
            Ok(value) => match predicate(&value) {
                Ok(true) => Some(Ok(value)),
                Ok(false) => None,
                Err(error) => Some(Err(error)),
            },
            Err(error) => Some(Err(error)),
        }))
    }

    /// Lazily replaces each successful item with the values `expand` returns.
    #[must_use]
    pub fn flat_map_values<F>(self, expand: F) -> Self
    where
        F: Fn(Value) -> Result<Vec<Value>, CallError> + Send + 'static,
    {
        Self::from_results(self.flat_map(move |item| {
            let expanded: Vec<Result<Value, CallError>> = match item.and_then(&expand) {
                Ok(values) => values.into_iter().map(Ok).collect(),
                Err(error) => vec![Err(error)],
            };
            expanded
        }))
    }

    /// Returns `true` when both handles share one cursor.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }
}

impl Iterator for Sequence {
    type Item = Result<Value, CallError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Sequence").finish_non_exhaustive()
    }
}
