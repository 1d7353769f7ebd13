//! Document and field repositories.

use super::{attributes, Repository};
use crate::entity::{Document, Entity, Field};
use crate::types::{ColumnId, DocumentId, FieldId, SchemaId};
use blixt_storage::{Attributes, Conditions, Record, StorageDriver, StorageResult, Table, Value};
use std::sync::Arc;

const SCHEMA_ID: &str = "schema_id";
const KEY: &str = "key";
const DOCUMENT_ID: &str = "document_id";
const COLUMN_ID: &str = "column_id";
const VALUE: &str = "value";

/// Repository of [`Document`] rows.
#[derive(Clone)]
pub struct DocumentRepository {
    driver: Arc<dyn StorageDriver>,
}

impl DocumentRepository {
    /// Creates a repository over the driver.
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Finds the document of a schema with the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn find_by_key(&self, schema_id: SchemaId, key: &Value) -> StorageResult<Option<Document>> {
        self.find_by(
            &Conditions::new()
                .eq(SCHEMA_ID, schema_id)
                .eq(KEY, key.clone()),
        )
    }

    /// Returns the documents of a schema in ingestion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn get_by_schema(
        &self,
        schema_id: SchemaId,
        offset: usize,
        limit: Option<usize>,
    ) -> StorageResult<Vec<Document>> {
        self.get_where(&Conditions::new().eq(SCHEMA_ID, schema_id), offset, limit)
    }
}

impl Repository for DocumentRepository {
    type Entity = Document;
    const TABLE: Table = Table::Documents;

    fn driver(&self) -> &dyn StorageDriver {
        self.driver.as_ref()
    }

    fn to_attributes(document: &Document) -> Attributes {
        attributes([
            (SCHEMA_ID, document.schema_id().into()),
            (KEY, document.key().clone()),
        ])
    }

    fn to_entity(record: &Record) -> StorageResult<Document> {
        Ok(Document::new(
            SchemaId::new(record.unsigned(SCHEMA_ID)?),
            record.value(KEY)?.clone(),
        )
        .with_id(DocumentId::new(record.id)))
    }
}

/// Repository of [`Field`] rows.
#[derive(Clone)]
pub struct FieldRepository {
    driver: Arc<dyn StorageDriver>,
}

impl FieldRepository {
    /// Creates a repository over the driver.
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Returns the fields of a document in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn get_by_document(&self, document_id: DocumentId) -> StorageResult<Vec<Field>> {
        self.get_where(&Conditions::new().eq(DOCUMENT_ID, document_id), 0, None)
    }
}

impl Repository for FieldRepository {
    type Entity = Field;
    const TABLE: Table = Table::Fields;

    fn driver(&self) -> &dyn StorageDriver {
        self.driver.as_ref()
    }

    fn to_attributes(field: &Field) -> Attributes {
        attributes([
            (DOCUMENT_ID, field.document_id().into()),
            (COLUMN_ID, field.column_id().into()),
            (VALUE, field.value().clone()),
        ])
    }

    fn to_entity(record: &Record) -> StorageResult<Field> {
        Ok(Field::new(
            DocumentId::new(record.unsigned(DOCUMENT_ID)?),
            ColumnId::new(record.unsigned(COLUMN_ID)?),
            record.value(VALUE)?.clone(),
        )
        .with_id(FieldId::new(record.id)))
    }
}
