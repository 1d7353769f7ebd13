//! Error types for storage operations.

use crate::record::RecordId;
use crate::table::Table;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The store has not been created yet.
    #[error("storage does not exist")]
    NotCreated,

    /// Attempted to create a store that already exists.
    #[error("storage already exists")]
    AlreadyExists,

    /// No row with the given id exists in the table.
    #[error("record {id} not found in table {table}")]
    RecordNotFound {
        /// The table searched.
        table: Table,
        /// The missing row id.
        id: RecordId,
    },

    /// A transaction primitive was used with no open transaction.
    #[error("no active transaction")]
    NoActiveTransaction,

    /// An entity without an id was passed where a stored row is required.
    #[error("entity for table {table} has no id")]
    MissingId {
        /// The table the entity belongs to.
        table: Table,
    },

    /// A row does not have the shape its table requires.
    #[error("invalid record {id} in table {table}: {message}")]
    InvalidRecord {
        /// The table the row belongs to.
        table: Table,
        /// The offending row id.
        id: RecordId,
        /// What is wrong with the row.
        message: String,
    },

    /// A backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Creates an invalid record error.
    pub fn invalid_record(table: Table, id: RecordId, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            table,
            id,
            message: message.into(),
        }
    }

    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
