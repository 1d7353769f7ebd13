//! Repository manager and transaction wrapper.

use crate::error::CoreResult;
use crate::repository::{
    ColumnRepository, DocumentRepository, FieldRepository, OccurrenceRepository,
    PositionRepository, SchemaRepository, TermRepository, WordRepository,
};
use blixt_storage::{StorageDriver, StorageResult};
use std::sync::Arc;

/// Owns the storage driver and one repository per entity kind.
///
/// All repositories share the same driver, so writes made through any of
/// them inside [`Storage::transaction`] commit or roll back together.
#[derive(Clone)]
pub struct Storage {
    driver: Arc<dyn StorageDriver>,
    schemas: SchemaRepository,
    columns: ColumnRepository,
    documents: DocumentRepository,
    fields: FieldRepository,
    words: WordRepository,
    terms: TermRepository,
    occurrences: OccurrenceRepository,
    positions: PositionRepository,
}

impl Storage {
    /// Creates the repositories over a driver.
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self {
            schemas: SchemaRepository::new(Arc::clone(&driver)),
            columns: ColumnRepository::new(Arc::clone(&driver)),
            documents: DocumentRepository::new(Arc::clone(&driver)),
            fields: FieldRepository::new(Arc::clone(&driver)),
            words: WordRepository::new(Arc::clone(&driver)),
            terms: TermRepository::new(Arc::clone(&driver)),
            occurrences: OccurrenceRepository::new(Arc::clone(&driver)),
            positions: PositionRepository::new(Arc::clone(&driver)),
            driver,
        }
    }

    /// Returns the underlying driver.
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn StorageDriver> {
        &self.driver
    }

    /// Schema repository.
    #[must_use]
    pub fn schemas(&self) -> &SchemaRepository {
        &self.schemas
    }

    /// Column repository.
    #[must_use]
    pub fn columns(&self) -> &ColumnRepository {
        &self.columns
    }

    /// Document repository.
    #[must_use]
    pub fn documents(&self) -> &DocumentRepository {
        &self.documents
    }

    /// Field repository.
    #[must_use]
    pub fn fields(&self) -> &FieldRepository {
        &self.fields
    }

    /// Word repository.
    #[must_use]
    pub fn words(&self) -> &WordRepository {
        &self.words
    }

    /// Term repository.
    #[must_use]
    pub fn terms(&self) -> &TermRepository {
        &self.terms
    }

    /// Occurrence repository.
    #[must_use]
    pub fn occurrences(&self) -> &OccurrenceRepository {
        &self.occurrences
    }

    /// Position repository.
    #[must_use]
    pub fn positions(&self) -> &PositionRepository {
        &self.positions
    }

    /// Tells whether the store exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn exists(&self) -> CoreResult<bool> {
        Ok(self.driver.exists()?)
    }

    /// Creates the store unless it already exists.
    ///
    /// Returns `true` if the store was created by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn install(&self) -> CoreResult<bool> {
        if self.driver.exists()? {
            return Ok(false);
        }
        self.driver.create()?;
        tracing::info!("storage installed");
        Ok(true)
    }

    /// Destroys the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn destroy(&self) -> CoreResult<bool> {
        Ok(self.driver.destroy()?)
    }

    /// Executes a function within a transaction.
    ///
    /// Commits if the function returns `Ok`, rolls back if it returns
    /// `Err` or panics. The original error is returned unchanged even when
    /// the rollback itself fails.
    ///
    /// # Errors
    ///
    /// Returns the error of the function, or a storage error if the
    /// transaction cannot be opened or committed.
    pub fn transaction<F, T>(&self, f: F) -> CoreResult<T>
    where
        F: FnOnce(&Storage) -> CoreResult<T>,
    {
        let guard = TransactionGuard::begin(self.driver.as_ref())?;
        match f(self) {
            Ok(result) => {
                guard.commit()?;
                Ok(result)
            }
            Err(e) => {
                guard.rollback();
                Err(e)
            }
        }
    }
}

/// An open driver transaction.
///
/// Dropping the guard without committing rolls the transaction back, so a
/// unit of work that unwinds leaves nothing behind and releases the driver.
struct TransactionGuard<'a> {
    driver: &'a dyn StorageDriver,
    open: bool,
}

impl<'a> TransactionGuard<'a> {
    fn begin(driver: &'a dyn StorageDriver) -> StorageResult<Self> {
        driver.begin()?;
        Ok(Self { driver, open: true })
    }

    /// Commits; a failed commit is rolled back before its error is returned.
    fn commit(mut self) -> StorageResult<()> {
        self.open = false;
        if let Err(e) = self.driver.commit() {
            if let Err(rollback_error) = self.driver.rollback() {
                tracing::warn!(
                    error = %rollback_error,
                    commit_error = %e,
                    "rollback after failed commit failed"
                );
            }
            return Err(e);
        }
        Ok(())
    }

    fn rollback(mut self) {
        self.open = false;
        if let Err(rollback_error) = self.driver.rollback() {
            tracing::warn!(error = %rollback_error, "rollback failed");
        }
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        if self.open {
            if let Err(rollback_error) = self.driver.rollback() {
                tracing::warn!(error = %rollback_error, "rollback of abandoned transaction failed");
            }
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, Word};
    use crate::error::CoreError;
    use crate::repository::Repository;
    use blixt_storage::{
        Attributes, Conditions, MemoryDriver, Record, RecordId, StorageError, Table,
    };
    use std::panic::{self, AssertUnwindSafe};
    use std::thread;

    fn storage() -> (Arc<MemoryDriver>, Storage) {
        let driver = Arc::new(MemoryDriver::created());
        let storage = Storage::new(driver.clone());
        (driver, storage)
    }

    #[test]
    fn transaction_commits_on_ok() {
        let (driver, storage) = storage();
        let word = storage
            .transaction(|s| Ok(s.words().create(Word::new("joe"))?))
            .unwrap();
        assert_eq!(word.text(), "joe");
        assert_eq!(driver.count(Table::Words), 1);
        assert!(!driver.in_transaction());
    }

    #[test]
    fn transaction_rolls_back_and_keeps_error() {
        let (driver, storage) = storage();
        let result: CoreResult<()> = storage.transaction(|s| {
            s.words().create(Word::new("joe"))?;
            Err(CoreError::invalid_document("boom"))
        });
        assert_eq!(result, Err(CoreError::invalid_document("boom")));
        assert_eq!(driver.count(Table::Words), 0);
        assert!(!driver.in_transaction());
    }

    #[test]
    fn nested_transaction_rolls_back_inner_only() {
        let (driver, storage) = storage();
        storage
            .transaction(|s| {
                s.words().create(Word::new("outer"))?;
                let inner: CoreResult<()> = s.transaction(|s| {
                    s.words().create(Word::new("inner"))?;
                    Err(CoreError::invalid_document("inner"))
                });
                assert!(inner.is_err());
                Ok(())
            })
            .unwrap();
        let words: Vec<_> = storage
            .words()
            .all(0, None)
            .unwrap()
            .into_iter()
            .map(|w| w.text().to_string())
            .collect();
        assert_eq!(words, vec!["outer"]);
        assert_eq!(driver.count(Table::Words), 1);
    }

    #[test]
    fn install_is_idempotent() {
        let storage = Storage::new(Arc::new(MemoryDriver::new()));
        assert!(!storage.exists().unwrap());
        assert!(storage.install().unwrap());
        assert!(!storage.install().unwrap());
        assert!(storage.exists().unwrap());
        assert!(storage.destroy().unwrap());
        assert!(!storage.exists().unwrap());
    }

    #[test]
    fn transaction_on_missing_store_fails() {
        let storage = Storage::new(Arc::new(MemoryDriver::new()));
        let result = storage.transaction(|_| Ok(()));
        assert!(matches!(result, Err(e) if e.is_storage_failure()));
    }

    #[test]
    fn transaction_rolls_back_on_panic() {
        let (driver, storage) = storage();
        storage.words().create(Word::new("kept")).unwrap();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            storage.transaction(|s| -> CoreResult<()> {
                s.words().create(Word::new("lost"))?;
                panic!("unit of work panicked");
            })
        }));
        assert!(result.is_err());
        assert!(!driver.in_transaction());

        let other = Arc::clone(&driver);
        let words = thread::spawn(move || other.count(Table::Words))
            .join()
            .unwrap();
        assert_eq!(words, 1);
        let next = storage.words().create(Word::new("next")).unwrap();
        assert_eq!(next.id().map(|id| id.as_u64()), Some(2));
    }

    /// Delegates to a memory driver but refuses every commit.
    struct RefusingCommit(MemoryDriver);

    impl StorageDriver for RefusingCommit {
        fn exists(&self) -> StorageResult<bool> {
            self.0.exists()
        }

        fn create(&self) -> StorageResult<()> {
            self.0.create()
        }

        fn destroy(&self) -> StorageResult<bool> {
            self.0.destroy()
        }

        fn begin(&self) -> StorageResult<()> {
            self.0.begin()
        }

        fn commit(&self) -> StorageResult<()> {
            Err(StorageError::backend("commit refused"))
        }

        fn rollback(&self) -> StorageResult<()> {
            self.0.rollback()
        }

        fn find(&self, table: Table, id: RecordId) -> StorageResult<Option<Record>> {
            self.0.find(table, id)
        }

        fn get_where(
            &self,
            table: Table,
            conditions: &Conditions,
            offset: usize,
            limit: Option<usize>,
        ) -> StorageResult<Vec<Record>> {
            self.0.get_where(table, conditions, offset, limit)
        }

        fn insert(&self, table: Table, attributes: Attributes) -> StorageResult<Record> {
            self.0.insert(table, attributes)
        }

        fn update(
            &self,
            table: Table,
            id: RecordId,
            attributes: Attributes,
        ) -> StorageResult<Record> {
            self.0.update(table, id, attributes)
        }
    }

    #[test]
    fn failed_commit_is_rolled_back() {
        let driver = Arc::new(RefusingCommit(MemoryDriver::created()));
        let storage = Storage::new(driver.clone());

        let result = storage.transaction(|s| Ok(s.words().create(Word::new("joe"))?));
        assert_eq!(
            result.err(),
            Some(CoreError::Storage(StorageError::backend("commit refused")))
        );
        assert_eq!(driver.0.count(Table::Words), 0);
        assert!(!driver.0.in_transaction());
    }
}
