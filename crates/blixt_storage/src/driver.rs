//! Storage driver trait definition.

use crate::conditions::Conditions;
use crate::error::StorageResult;
use crate::record::{Attributes, Record, RecordId};
use crate::table::Table;

/// A generic row store backing an index.
///
/// Drivers are **domain agnostic**. They store rows in fixed logical
/// tables and answer exact-match queries. Uniqueness of words, terms and
/// documents is enforced by the caller, never by the driver.
///
/// # Invariants
///
/// - `insert` assigns ids starting at 1, increasing by one per table
/// - `get_where` returns rows in ascending id order
/// - Writes made between `begin` and `rollback` leave no trace, id
///   counters included
/// - Transactions nest; an inner `rollback` only undoes writes made since
///   the matching `begin`
/// - Implementations must be `Send + Sync` and must isolate an open
///   transaction from other threads
///
/// # Implementors
///
/// - [`super::MemoryDriver`] - In-memory tables
pub trait StorageDriver: Send + Sync {
    /// Tells whether the store exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    fn exists(&self) -> StorageResult<bool>;

    /// Creates the store with empty tables.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::AlreadyExists`] if the store exists.
    fn create(&self) -> StorageResult<()>;

    /// Destroys the store and everything in it.
    ///
    /// Returns `false` if there was nothing to destroy.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn destroy(&self) -> StorageResult<bool>;

    /// Opens a transaction, or a savepoint if one is already open.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist.
    fn begin(&self) -> StorageResult<()>;

    /// Commits the innermost open transaction.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NoActiveTransaction`] if none is open.
    fn commit(&self) -> StorageResult<()>;

    /// Discards every write made since the innermost `begin`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NoActiveTransaction`] if none is open.
    fn rollback(&self) -> StorageResult<()>;

    /// Finds a row by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist.
    fn find(&self, table: Table, id: RecordId) -> StorageResult<Option<Record>>;

    /// Finds the first row matching the conditions.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist.
    fn find_by(&self, table: Table, conditions: &Conditions) -> StorageResult<Option<Record>> {
        Ok(self
            .get_where(table, conditions, 0, Some(1))?
            .into_iter()
            .next())
    }

    /// Returns the rows matching the conditions, skipping `offset` and
    /// returning at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist.
    fn get_where(
        &self,
        table: Table,
        conditions: &Conditions,
        offset: usize,
        limit: Option<usize>,
    ) -> StorageResult<Vec<Record>>;

    /// Inserts a new row and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist.
    fn insert(&self, table: Table, attributes: Attributes) -> StorageResult<Record>;

    /// Overwrites the attributes of an existing row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::RecordNotFound`] if the id is unknown.
    fn update(&self, table: Table, id: RecordId, attributes: Attributes) -> StorageResult<Record>;
}
