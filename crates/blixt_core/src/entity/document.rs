//! Document and field entities.

use crate::entity::impl_entity;
use crate::types::{ColumnId, DocumentId, FieldId, SchemaId};
use blixt_storage::Value;

/// An ingested document, identified within its schema by a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: Option<DocumentId>,
    schema_id: SchemaId,
    key: Value,
}

impl_entity!(Document, DocumentId);

impl Document {
    /// Creates a document that has not been persisted.
    pub fn new(schema_id: SchemaId, key: impl Into<Value>) -> Self {
        Self {
            id: None,
            schema_id,
            key: key.into(),
        }
    }

    /// Returns the owning schema.
    #[must_use]
    pub fn schema_id(&self) -> SchemaId {
        self.schema_id
    }

    /// Returns the external key.
    #[must_use]
    pub fn key(&self) -> &Value {
        &self.key
    }
}

/// The value of one column for one document.
///
/// The value is `Null` unless the column is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: Option<FieldId>,
    document_id: DocumentId,
    column_id: ColumnId,
    value: Value,
}

impl_entity!(Field, FieldId);

impl Field {
    /// Creates a field that has not been persisted.
    pub fn new(document_id: DocumentId, column_id: ColumnId, value: impl Into<Value>) -> Self {
        Self {
            id: None,
            document_id,
            column_id,
            value: value.into(),
        }
    }

    /// Returns the owning document.
    #[must_use]
    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    /// Returns the column this field fills.
    #[must_use]
    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the stored value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}
