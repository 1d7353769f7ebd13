//! Generic table rows.

use crate::error::{StorageError, StorageResult};
use crate::table::Table;
use crate::value::Value;
use std::collections::BTreeMap;

/// Identifier of a row within one table.
///
/// Ids start at 1 and increase by one per table. They are immutable once
/// assigned.
pub type RecordId = u64;

/// Named attribute values of a row.
pub type Attributes = BTreeMap<String, Value>;

/// A row as stored by a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The table the row belongs to.
    pub table: Table,
    /// Driver-assigned id.
    pub id: RecordId,
    /// Attribute values.
    pub attributes: Attributes,
}

impl Record {
    /// Creates a new record.
    #[must_use]
    pub fn new(table: Table, id: RecordId, attributes: Attributes) -> Self {
        Self {
            table,
            id,
            attributes,
        }
    }

    /// Returns an attribute value, failing if it is absent.
    pub fn value(&self, name: &str) -> StorageResult<&Value> {
        self.attributes
            .get(name)
            .ok_or_else(|| self.invalid(format!("missing attribute '{name}'")))
    }

    /// Returns an integer attribute.
    pub fn integer(&self, name: &str) -> StorageResult<i64> {
        self.value(name)?
            .as_integer()
            .ok_or_else(|| self.invalid(format!("attribute '{name}' is not an integer")))
    }

    /// Returns a non-negative integer attribute, such as the id of another
    /// row or a counter.
    pub fn unsigned(&self, name: &str) -> StorageResult<u64> {
        let raw = self.integer(name)?;
        u64::try_from(raw)
            .map_err(|_| self.invalid(format!("attribute '{name}' is negative: {raw}")))
    }

    /// Returns a non-negative integer attribute that must fit in 32 bits.
    pub fn unsigned32(&self, name: &str) -> StorageResult<u32> {
        let raw = self.unsigned(name)?;
        u32::try_from(raw)
            .map_err(|_| self.invalid(format!("attribute '{name}' is out of range: {raw}")))
    }

    /// Returns a text attribute.
    pub fn text(&self, name: &str) -> StorageResult<&str> {
        self.value(name)?
            .as_str()
            .ok_or_else(|| self.invalid(format!("attribute '{name}' is not text")))
    }

    /// Returns a boolean attribute.
    pub fn boolean(&self, name: &str) -> StorageResult<bool> {
        self.value(name)?
            .as_bool()
            .ok_or_else(|| self.invalid(format!("attribute '{name}' is not a boolean")))
    }

    fn invalid(&self, message: String) -> StorageError {
        StorageError::invalid_record(self.table, self.id, message)
    }
}
