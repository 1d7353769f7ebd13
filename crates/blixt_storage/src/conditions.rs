//! Exact-match row filters.

use crate::record::Attributes;
use crate::value::Value;

/// A predicate on a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The attribute equals the value.
    Equals(Value),
    /// The attribute equals any of the values.
    AnyOf(Vec<Value>),
}

impl Condition {
    fn matches(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (Condition::Equals(expected), Some(actual)) => expected == actual,
            (Condition::AnyOf(candidates), Some(actual)) => candidates.contains(actual),
            (Condition::Equals(expected), None) => expected.is_null(),
            (Condition::AnyOf(candidates), None) => candidates.iter().any(Value::is_null),
        }
    }
}

/// A conjunction of attribute conditions.
///
/// An empty set of conditions matches every row. A missing attribute is
/// treated as `Null`.
///
/// # Example
///
/// ```rust
/// use blixt_storage::{Conditions, Value};
///
/// let conditions = Conditions::new()
///     .eq("schema_id", 1)
///     .any_of("word_id", [1, 2, 3]);
/// assert_eq!(conditions.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    entries: Vec<(String, Condition)>,
}

impl Conditions {
    /// Creates an empty set of conditions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition.
    #[must_use]
    pub fn eq(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries
            .push((attribute.into(), Condition::Equals(value.into())));
        self
    }

    /// Adds a membership condition.
    #[must_use]
    pub fn any_of<I, V>(mut self, attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.entries
            .push((attribute.into(), Condition::AnyOf(values)));
        self
    }

    /// Returns the conditions as `(attribute, condition)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Returns the number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks whether a row's attributes satisfy every condition.
    #[must_use]
    pub fn matches(&self, attributes: &Attributes) -> bool {
        self.entries
            .iter()
            .all(|(name, condition)| condition.matches(attributes.get(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, Value)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_matches_everything() {
        assert!(Conditions::new().matches(&Attributes::new()));
    }

    #[test]
    fn equality_is_conjunctive() {
        let row = attrs(&[("schema_id", Value::from(1)), ("key", Value::from(7))]);
        assert!(Conditions::new().eq("schema_id", 1).eq("key", 7).matches(&row));
        assert!(!Conditions::new().eq("schema_id", 1).eq("key", 8).matches(&row));
    }

    #[test]
    fn any_of_matches_members() {
        let row = attrs(&[("term_id", Value::from(2))]);
        assert!(Conditions::new().any_of("term_id", [1, 2]).matches(&row));
        assert!(!Conditions::new().any_of("term_id", [3, 4]).matches(&row));
        assert!(!Conditions::new()
            .any_of("term_id", Vec::<i64>::new())
            .matches(&row));
    }

    #[test]
    fn missing_attribute_is_null() {
        let row = Attributes::new();
        assert!(Conditions::new().eq("value", Value::Null).matches(&row));
        assert!(!Conditions::new().eq("value", 1).matches(&row));
    }

    #[test]
    fn values_compare_by_type() {
        let row = attrs(&[("key", Value::from(1))]);
        assert!(!Conditions::new().eq("key", "1").matches(&row));
    }
}
