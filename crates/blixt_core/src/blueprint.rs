//! Schema blueprints.

use crate::error::{CoreError, CoreResult};
use std::collections::HashSet;

/// A column declaration of a blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Column name.
    pub name: String,
    /// Whether the column is tokenized into the index.
    pub indexed: bool,
    /// Whether the column value is kept verbatim.
    pub stored: bool,
}

/// Describes a schema to create.
///
/// # Example
///
/// ```rust
/// use blixt_core::Blueprint;
///
/// let blueprint = Blueprint::new("people").indexed("name").stored("age");
/// assert_eq!(blueprint.definitions().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    name: String,
    definitions: Vec<Definition>,
}

impl Blueprint {
    /// Creates a blueprint with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
        }
    }

    /// Declares a column.
    #[must_use]
    pub fn define(mut self, name: impl Into<String>, indexed: bool, stored: bool) -> Self {
        self.definitions.push(Definition {
            name: name.into(),
            indexed,
            stored,
        });
        self
    }

    /// Declares an indexed, not stored column.
    #[must_use]
    pub fn indexed(self, name: impl Into<String>) -> Self {
        self.define(name, true, false)
    }

    /// Declares a stored, not indexed column.
    #[must_use]
    pub fn stored(self, name: impl Into<String>) -> Self {
        self.define(name, false, true)
    }

    /// Returns the schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column declarations in order.
    #[must_use]
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Checks that the blueprint can become a schema.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidBlueprint`] if there are no columns,
    /// a column has an empty name, or two columns share a name.
    pub fn validate(&self) -> CoreResult<()> {
        if self.definitions.is_empty() {
            return Err(CoreError::invalid_blueprint(format!(
                "blueprint '{}' has no column definitions",
                self.name
            )));
        }
        let mut seen = HashSet::new();
        for definition in &self.definitions {
            if definition.name.is_empty() {
                return Err(CoreError::invalid_blueprint(format!(
                    "blueprint '{}' has a column without a name",
                    self.name
                )));
            }
            if !seen.insert(definition.name.as_str()) {
                return Err(CoreError::invalid_blueprint(format!(
                    "blueprint '{}' defines column '{}' twice",
                    self.name, definition.name
                )));
            }
        }
        Ok(())
    }
}
