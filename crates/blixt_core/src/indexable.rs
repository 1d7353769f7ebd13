//! Input documents.

use blixt_storage::Value;
use std::collections::BTreeMap;

/// A document to ingest: an external key and named field values.
///
/// Fields that match no column of the target schema are ignored on
/// ingestion.
///
/// # Example
///
/// ```rust
/// use blixt_core::Indexable;
///
/// let person = Indexable::new(1)
///     .field("name", "Joe Bloggs")
///     .field("age", 30);
/// assert_eq!(person.get("age").and_then(|v| v.as_integer()), Some(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indexable {
    key: Value,
    fields: BTreeMap<String, Value>,
}

impl Indexable {
    /// Creates a document with no fields.
    pub fn new(key: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Returns the document with a field set.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &Value {
        &self.key
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns true if the field is present, even if its value is null.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns all fields ordered by name.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}
