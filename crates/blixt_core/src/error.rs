//! Error types for Blixt core.

use blixt_storage::{StorageError, Value};
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in Blixt core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Storage driver error, including transaction failures.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// No schema with the requested name exists.
    #[error("schema does not exist: {name}")]
    SchemaDoesNotExist {
        /// Name of the schema.
        name: String,
    },

    /// A schema with the requested name already exists.
    #[error("index already exists: {name}")]
    IndexAlreadyExists {
        /// Name of the schema.
        name: String,
    },

    /// The blueprint cannot be turned into a schema.
    #[error("invalid blueprint: {message}")]
    InvalidBlueprint {
        /// Description of the problem.
        message: String,
    },

    /// The stored schema cannot back an index.
    #[error("invalid schema: {message}")]
    InvalidSchema {
        /// Description of the problem.
        message: String,
    },

    /// A document with the same key already exists in the schema.
    #[error("document with key {key} already exists in {schema} index")]
    DocumentAlreadyExists {
        /// Name of the schema.
        schema: String,
        /// The duplicate key.
        key: Value,
    },

    /// The document does not satisfy the schema.
    #[error("invalid document: {message}")]
    InvalidDocument {
        /// Description of the problem.
        message: String,
    },
}

impl CoreError {
    /// Creates a schema does not exist error.
    pub fn schema_does_not_exist(name: impl Into<String>) -> Self {
        Self::SchemaDoesNotExist { name: name.into() }
    }

    /// Creates an index already exists error.
    pub fn index_already_exists(name: impl Into<String>) -> Self {
        Self::IndexAlreadyExists { name: name.into() }
    }

    /// Creates an invalid blueprint error.
    pub fn invalid_blueprint(message: impl Into<String>) -> Self {
        Self::InvalidBlueprint {
            message: message.into(),
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates a document already exists error.
    pub fn document_already_exists(schema: impl Into<String>, key: Value) -> Self {
        Self::DocumentAlreadyExists {
            schema: schema.into(),
            key,
        }
    }

    /// Creates an invalid document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Returns true if this error came from the storage driver.
    #[must_use]
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
