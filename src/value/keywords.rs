//! Insertion-ordered keyword map.

use super::{IntoValue, Value};

/// An insertion-ordered map from parameter names to values.
///
/// Used for keyword bindings and for the extras collected by a keyword-rest
/// parameter. Names are unique; [`Keywords::insert`] replaces an existing
/// entry in place.
///
/// # Examples
///
/// ```rust
/// use pointfree::{Keywords, Value};
///
/// let mut keywords = Keywords::new();
/// keywords.insert("d", 4_i64);
/// keywords.insert("e", 5_i64);
///
/// assert_eq!(keywords.get("e"), Some(&Value::Int(5)));
/// assert_eq!(keywords.names().collect::<Vec<_>>(), vec!["d", "e"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keywords {
    entries: Vec<(String, Value)>,
}

impl Keywords {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` when `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Binds `name`, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl IntoValue) -> Option<Value> {
        let name = name.into();
        let value = value.into_value();
        match self.entries.iter_mut().find(|(entry_name, _)| *entry_name == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self
            .entries
            .iter()
            .position(|(entry_name, _)| entry_name == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Iterates over the names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<N, V> FromIterator<(N, V)> for Keywords
where
    N: Into<String>,
    V: IntoValue,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iterator: I) -> Self {
        let mut keywords = Self::new();
        for (name, value) in iterator {
            keywords.insert(name, value);
        }
        keywords
    }
}

impl IntoIterator for Keywords {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
