//! Ordered field lists for YABE records.
//!
//! A [`Record`] is a list of `(name, value)` pairs in wire order. The format
//! does not require names to be unique, so `Record` is a `Vec` of pairs rather
//! than a map: a decoded record keeps every field it was given, duplicates
//! included. Convert to an [`IndexMap`] when unique-name semantics are wanted.
//!
//! ## Examples
//!
//! ```rust
//! use yabe::{Record, Value};
//!
//! let mut record = Record::new();
//! record.push("name", Value::from("Alice"));
//! record.push("age", Value::from(30));
//!
//! assert_eq!(record.len(), 2);
//! assert_eq!(record.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An ordered list of named values.
///
/// # Examples
///
/// ```rust
/// use yabe::{Record, Value};
///
/// let mut record = Record::new();
/// record.push("first", Value::from(1));
/// record.push("second", Value::from(2));
///
/// let names: Vec<_> = record.names().collect();
/// assert_eq!(names, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(Vec<(String, Value)>);

impl Record {
    /// Creates an empty `Record`.
    #[must_use]
    pub fn new() -> Self {
        Record(Vec::new())
    }

    /// Creates an empty `Record` with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Record(Vec::with_capacity(capacity))
    }

    /// Appends a field. Existing fields with the same name are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yabe::{Record, Value};
    ///
    /// let mut record = Record::new();
    /// record.push("tag", Value::from("a"));
    /// record.push("tag", Value::from("b"));
    /// assert_eq!(record.len(), 2);
    /// ```
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.0.push((name.into(), value));
    }

    /// Returns the value of the first field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns the values of every field called `name`, in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yabe::{Record, Value};
    ///
    /// let mut record = Record::new();
    /// record.push("tag", Value::from("a"));
    /// record.push("id", Value::from(1));
    /// record.push("tag", Value::from("b"));
    ///
    /// let tags: Vec<_> = record.get_all("tag").filter_map(Value::as_str).collect();
    /// assert_eq!(tags, vec!["a", "b"]);
    /// ```
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.0
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if at least one field is called `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterates over field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over field values in order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.iter().map(|(_, v)| v)
    }

    /// Collapses the record into a map with unique names.
    ///
    /// A repeated name keeps the position of its first occurrence and the
    /// value of its last.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yabe::{Record, Value};
    ///
    /// let mut record = Record::new();
    /// record.push("a", Value::from(1));
    /// record.push("b", Value::from(2));
    /// record.push("a", Value::from(3));
    ///
    /// let map = record.into_index_map();
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get_index(0), Some((&"a".to_string(), &Value::from(3))));
    /// ```
    #[must_use]
    pub fn into_index_map(self) -> IndexMap<String, Value> {
        self.0.into_iter().collect()
    }
}

impl From<IndexMap<String, Value>> for Record {
    fn from(map: IndexMap<String, Value>) -> Self {
        Record(map.into_iter().collect())
    }
}

impl From<Vec<(String, Value)>> for Record {
    fn from(fields: Vec<(String, Value)>) -> Self {
        Record(fields)
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Record(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
