//! Schema and column repositories.

use super::{attributes, Repository};
use crate::entity::{Column, Entity, Schema};
use crate::types::{ColumnId, SchemaId};
use blixt_storage::{Attributes, Conditions, Record, StorageDriver, StorageResult, Table};
use std::sync::Arc;

const NAME: &str = "name";
const SCHEMA_ID: &str = "schema_id";
const IS_INDEXED: &str = "is_indexed";
const IS_STORED: &str = "is_stored";

/// Repository of [`Schema`] rows.
///
/// Schemas are returned without their columns; see
/// [`ColumnRepository::get_by_schema`].
#[derive(Clone)]
pub struct SchemaRepository {
    driver: Arc<dyn StorageDriver>,
}

impl SchemaRepository {
    /// Creates a repository over the driver.
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Finds a schema by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn find_by_name(&self, name: &str) -> StorageResult<Option<Schema>> {
        self.find_by(&Conditions::new().eq(NAME, name))
    }
}

impl Repository for SchemaRepository {
    type Entity = Schema;
    const TABLE: Table = Table::Schemas;

    fn driver(&self) -> &dyn StorageDriver {
        self.driver.as_ref()
    }

    fn to_attributes(schema: &Schema) -> Attributes {
        attributes([(NAME, schema.name().into())])
    }

    fn to_entity(record: &Record) -> StorageResult<Schema> {
        Ok(Schema::new(record.text(NAME)?).with_id(SchemaId::new(record.id)))
    }
}

/// Repository of [`Column`] rows.
#[derive(Clone)]
pub struct ColumnRepository {
    driver: Arc<dyn StorageDriver>,
}

impl ColumnRepository {
    /// Creates a repository over the driver.
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Returns the columns of a schema in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn get_by_schema(&self, schema_id: SchemaId) -> StorageResult<Vec<Column>> {
        self.get_where(&Conditions::new().eq(SCHEMA_ID, schema_id), 0, None)
    }
}

impl Repository for ColumnRepository {
    type Entity = Column;
    const TABLE: Table = Table::Columns;

    fn driver(&self) -> &dyn StorageDriver {
        self.driver.as_ref()
    }

    fn to_attributes(column: &Column) -> Attributes {
        attributes([
            (SCHEMA_ID, column.schema_id().into()),
            (NAME, column.name().into()),
            (IS_INDEXED, column.is_indexed().into()),
            (IS_STORED, column.is_stored().into()),
        ])
    }

    fn to_entity(record: &Record) -> StorageResult<Column> {
        Ok(Column::new(
            SchemaId::new(record.unsigned(SCHEMA_ID)?),
            record.text(NAME)?,
            record.boolean(IS_INDEXED)?,
            record.boolean(IS_STORED)?,
        )
        .with_id(ColumnId::new(record.id)))
    }
}
