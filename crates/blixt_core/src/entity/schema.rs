//! Schema and column entities.

use crate::entity::impl_entity;
use crate::types::{ColumnId, SchemaId};

/// A named document type.
///
/// A schema owns an ordered list of columns. The columns are not part of
/// the schema's own row; they are loaded separately and attached with
/// [`Schema::with_columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    id: Option<SchemaId>,
    name: String,
    columns: Vec<Column>,
}

impl_entity!(Schema, SchemaId);

impl Schema {
    /// Creates a schema that has not been persisted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Returns the schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns true if columns have been attached.
    #[must_use]
    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Finds a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Finds a column by id.
    #[must_use]
    pub fn column_by_id(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == Some(id))
    }

    /// Returns the schema with the given columns attached.
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }
}

/// A named field slot of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    id: Option<ColumnId>,
    schema_id: SchemaId,
    name: String,
    is_indexed: bool,
    is_stored: bool,
}

impl_entity!(Column, ColumnId);

impl Column {
    /// Creates a column that has not been persisted.
    pub fn new(schema_id: SchemaId, name: impl Into<String>, is_indexed: bool, is_stored: bool) -> Self {
        Self {
            id: None,
            schema_id,
            name: name.into(),
            is_indexed,
            is_stored,
        }
    }

    /// Returns the owning schema.
    #[must_use]
    pub fn schema_id(&self) -> SchemaId {
        self.schema_id
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether values of this column are tokenized into the index.
    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.is_indexed
    }

    /// Whether values of this column are kept verbatim.
    #[must_use]
    pub fn is_stored(&self) -> bool {
        self.is_stored
    }
}
