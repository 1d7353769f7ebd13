//! In-memory storage driver.

use crate::conditions::Conditions;
use crate::driver::StorageDriver;
use crate::error::{StorageError, StorageResult};
use crate::record::{Attributes, Record, RecordId};
use crate::table::Table;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::BTreeMap;
use std::thread::{self, ThreadId};

/// Rows and id counter of one table.
#[derive(Debug, Default, Clone)]
struct TableData {
    rows: BTreeMap<RecordId, Attributes>,
    last_id: RecordId,
}

/// How to reverse a single write.
#[derive(Debug)]
enum Undo {
    Inserted {
        table: Table,
        id: RecordId,
        previous_last_id: RecordId,
    },
    Updated {
        table: Table,
        id: RecordId,
        previous: Attributes,
    },
}

/// An open transaction and its undo log.
#[derive(Debug)]
struct OpenTransaction {
    /// Thread that began the transaction.
    owner: ThreadId,
    /// Undo log length at each nested `begin`.
    savepoints: Vec<usize>,
    /// Writes to reverse on rollback, oldest first.
    undo: Vec<Undo>,
}

#[derive(Debug, Default)]
struct State {
    /// `None` until the store is created.
    tables: Option<BTreeMap<Table, TableData>>,
    transaction: Option<OpenTransaction>,
}

impl State {
    fn tables(&self) -> StorageResult<&BTreeMap<Table, TableData>> {
        self.tables.as_ref().ok_or(StorageError::NotCreated)
    }

    fn table_mut(&mut self, table: Table) -> StorageResult<&mut TableData> {
        let tables = self.tables.as_mut().ok_or(StorageError::NotCreated)?;
        Ok(tables.entry(table).or_default())
    }

    fn log(&mut self, undo: Undo) {
        if let Some(txn) = self.transaction.as_mut() {
            txn.undo.push(undo);
        }
    }

    fn revert(&mut self, undo: Undo) {
        let Some(tables) = self.tables.as_mut() else {
            return;
        };
        match undo {
            Undo::Inserted {
                table,
                id,
                previous_last_id,
            } => {
                let data = tables.entry(table).or_default();
                data.rows.remove(&id);
                data.last_id = previous_last_id;
            }
            Undo::Updated {
                table,
                id,
                previous,
            } => {
                tables.entry(table).or_default().rows.insert(id, previous);
            }
        }
    }
}

/// An in-memory storage driver.
///
/// Tables are ordered maps from id to attributes. This driver is suitable for:
/// - Unit and integration tests
/// - Ephemeral indexes that don't need persistence
///
/// # Thread Safety
///
/// The driver is single-writer. A transaction belongs to the thread that
/// began it, and every operation issued by another thread blocks until that
/// transaction is committed or rolled back. Check-then-act sequences run
/// inside a transaction (such as find-then-increment of a term counter)
/// are therefore never interleaved.
///
/// # Example
///
/// ```rust
/// use blixt_storage::{Attributes, MemoryDriver, StorageDriver, Table};
///
/// let driver = MemoryDriver::new();
/// driver.create().unwrap();
///
/// driver.begin().unwrap();
/// driver.insert(Table::Documents, Attributes::new()).unwrap();
/// driver.rollback().unwrap();
///
/// assert!(driver.rows(Table::Documents).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryDriver {
    state: Mutex<State>,
    released: Condvar,
}

impl MemoryDriver {
    /// Creates a driver whose store does not exist yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver with an empty, already created store.
    #[must_use]
    pub fn created() -> Self {
        let driver = Self::new();
        driver.state.lock().tables = Some(BTreeMap::new());
        driver
    }

    /// Returns a copy of all rows in a table, in id order.
    ///
    /// Useful for testing and debugging. Returns nothing if the store does
    /// not exist. Other threads wait for an open transaction and see
    /// committed rows only; the thread owning the transaction also sees its
    /// uncommitted writes.
    #[must_use]
    pub fn rows(&self, table: Table) -> Vec<Record> {
        let state = self.lock();
        state
            .tables
            .as_ref()
            .and_then(|tables| tables.get(&table))
            .map(|data| {
                data.rows
                    .iter()
                    .map(|(id, attrs)| Record::new(table, *id, attrs.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns a copy of every table, with the same visibility as
    /// [`MemoryDriver::rows`].
    #[must_use]
    pub fn dump(&self) -> BTreeMap<Table, Vec<Record>> {
        Table::ALL
            .iter()
            .map(|table| (*table, self.rows(*table)))
            .collect()
    }

    /// Returns the number of rows in a table.
    #[must_use]
    pub fn count(&self, table: Table) -> usize {
        let state = self.lock();
        state
            .tables
            .as_ref()
            .and_then(|tables| tables.get(&table))
            .map_or(0, |data| data.rows.len())
    }

    /// Returns true if the calling thread has an open transaction.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.state
            .lock()
            .transaction
            .as_ref()
            .is_some_and(|txn| txn.owner == thread::current().id())
    }

    /// Locks the state, waiting for any transaction owned by another
    /// thread to finish.
    fn lock(&self) -> MutexGuard<'_, State> {
        let me = thread::current().id();
        let mut state = self.state.lock();
        while state
            .transaction
            .as_ref()
            .is_some_and(|txn| txn.owner != me)
        {
            self.released.wait(&mut state);
        }
        state
    }
}

impl StorageDriver for MemoryDriver {
    fn exists(&self) -> StorageResult<bool> {
        Ok(self.lock().tables.is_some())
    }

    fn create(&self) -> StorageResult<()> {
        let mut state = self.lock();
        if state.tables.is_some() {
            return Err(StorageError::AlreadyExists);
        }
        state.tables = Some(BTreeMap::new());
        Ok(())
    }

    fn destroy(&self) -> StorageResult<bool> {
        let mut state = self.lock();
        if state.transaction.take().is_some() {
            self.released.notify_all();
        }
        Ok(state.tables.take().is_some())
    }

    fn begin(&self) -> StorageResult<()> {
        let mut state = self.lock();
        state.tables()?;
        match state.transaction.as_mut() {
            Some(txn) => {
                let mark = txn.undo.len();
                txn.savepoints.push(mark);
            }
            None => {
                state.transaction = Some(OpenTransaction {
                    owner: thread::current().id(),
                    savepoints: vec![0],
                    undo: Vec::new(),
                });
            }
        }
        Ok(())
    }

    fn commit(&self) -> StorageResult<()> {
        let mut state = self.lock();
        let txn = state
            .transaction
            .as_mut()
            .ok_or(StorageError::NoActiveTransaction)?;
        txn.savepoints.pop();
        if txn.savepoints.is_empty() {
            state.transaction = None;
            self.released.notify_all();
        }
        Ok(())
    }

    fn rollback(&self) -> StorageResult<()> {
        let mut state = self.lock();
        let txn = state
            .transaction
            .as_mut()
            .ok_or(StorageError::NoActiveTransaction)?;
        let mark = txn.savepoints.pop().unwrap_or(0);
        let reverted: Vec<Undo> = txn.undo.drain(mark..).collect();
        if txn.savepoints.is_empty() {
            state.transaction = None;
            self.released.notify_all();
        }
        for undo in reverted.into_iter().rev() {
            state.revert(undo);
        }
        Ok(())
    }

    fn find(&self, table: Table, id: RecordId) -> StorageResult<Option<Record>> {
        let state = self.lock();
        let tables = state.tables()?;
        Ok(tables
            .get(&table)
            .and_then(|data| data.rows.get(&id))
            .map(|attrs| Record::new(table, id, attrs.clone())))
    }

    fn get_where(
        &self,
        table: Table,
        conditions: &Conditions,
        offset: usize,
        limit: Option<usize>,
    ) -> StorageResult<Vec<Record>> {
        let state = self.lock();
        let tables = state.tables()?;
        let Some(data) = tables.get(&table) else {
            return Ok(Vec::new());
        };
        Ok(data
            .rows
            .iter()
            .filter(|(_, attrs)| conditions.matches(attrs))
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .map(|(id, attrs)| Record::new(table, *id, attrs.clone()))
            .collect())
    }

    fn insert(&self, table: Table, attributes: Attributes) -> StorageResult<Record> {
        let mut state = self.lock();
        let data = state.table_mut(table)?;
        let previous_last_id = data.last_id;
        let id = previous_last_id + 1;
        data.last_id = id;
        data.rows.insert(id, attributes.clone());
        state.log(Undo::Inserted {
            table,
            id,
            previous_last_id,
        });
        Ok(Record::new(table, id, attributes))
    }

    fn update(&self, table: Table, id: RecordId, attributes: Attributes) -> StorageResult<Record> {
        let mut state = self.lock();
        let data = state.table_mut(table)?;
        let Some(row) = data.rows.get_mut(&id) else {
            return Err(StorageError::RecordNotFound { table, id });
        };
        let previous = std::mem::replace(row, attributes.clone());
        state.log(Undo::Updated {
            table,
            id,
            previous,
        });
        Ok(Record::new(table, id, attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn word(text: &str) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("word".into(), Value::from(text));
        attrs
    }

    #[test]
    fn memory_new_does_not_exist() {
        let driver = MemoryDriver::new();
        assert!(!driver.exists().unwrap());
        assert_eq!(
            driver.insert(Table::Words, word("joe")),
            Err(StorageError::NotCreated)
        );
    }

    #[test]
    fn memory_create_twice_fails() {
        let driver = MemoryDriver::new();
        driver.create().unwrap();
        assert!(driver.exists().unwrap());
        assert_eq!(driver.create(), Err(StorageError::AlreadyExists));
    }

    #[test]
    fn memory_destroy() {
        let driver = MemoryDriver::created();
        driver.insert(Table::Words, word("joe")).unwrap();
        assert!(driver.destroy().unwrap());
        assert!(!driver.exists().unwrap());
        assert!(!driver.destroy().unwrap());
        assert!(driver.rows(Table::Words).is_empty());
    }

    #[test]
    fn memory_ids_increase_per_table() {
        let driver = MemoryDriver::created();
        assert_eq!(driver.insert(Table::Words, word("a")).unwrap().id, 1);
        assert_eq!(driver.insert(Table::Words, word("b")).unwrap().id, 2);
        assert_eq!(driver.insert(Table::Terms, Attributes::new()).unwrap().id, 1);
    }

    #[test]
    fn memory_get_where_filters_in_id_order() {
        let driver = MemoryDriver::created();
        for text in ["a", "b", "a", "c", "a"] {
            driver.insert(Table::Words, word(text)).unwrap();
        }
        let conditions = Conditions::new().eq("word", "a");

        let ids: Vec<_> = driver
            .get_where(Table::Words, &conditions, 0, None)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 5]);

        let page: Vec<_> = driver
            .get_where(Table::Words, &conditions, 1, Some(1))
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(page, vec![3]);
    }

    #[test]
    fn memory_find_by_returns_first_match() {
        let driver = MemoryDriver::created();
        driver.insert(Table::Words, word("x")).unwrap();
        driver.insert(Table::Words, word("y")).unwrap();
        let found = driver
            .find_by(Table::Words, &Conditions::new().eq("word", "y"))
            .unwrap()
            .unwrap();
        assert_eq!(found.id, 2);
        assert!(driver
            .find_by(Table::Words, &Conditions::new().eq("word", "z"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn memory_update_overwrites() {
        let driver = MemoryDriver::created();
        let record = driver.insert(Table::Words, word("old")).unwrap();
        driver.update(Table::Words, record.id, word("new")).unwrap();
        let found = driver.find(Table::Words, record.id).unwrap().unwrap();
        assert_eq!(found.text("word").unwrap(), "new");
    }

    #[test]
    fn memory_update_missing_fails() {
        let driver = MemoryDriver::created();
        assert_eq!(
            driver.update(Table::Terms, 4, Attributes::new()),
            Err(StorageError::RecordNotFound {
                table: Table::Terms,
                id: 4
            })
        );
    }

    #[test]
    fn memory_commit_keeps_writes() {
        let driver = MemoryDriver::created();
        driver.begin().unwrap();
        driver.insert(Table::Words, word("kept")).unwrap();
        driver.commit().unwrap();
        assert_eq!(driver.count(Table::Words), 1);
        assert!(!driver.in_transaction());
    }

    #[test]
    fn memory_rollback_discards_writes_and_ids() {
        let driver = MemoryDriver::created();
        let kept = driver.insert(Table::Words, word("kept")).unwrap();

        driver.begin().unwrap();
        driver.insert(Table::Words, word("gone")).unwrap();
        driver.update(Table::Words, kept.id, word("changed")).unwrap();
        driver.rollback().unwrap();

        let rows = driver.rows(Table::Words);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("word").unwrap(), "kept");
        assert_eq!(driver.insert(Table::Words, word("next")).unwrap().id, 2);
    }

    #[test]
    fn memory_nested_rollback_keeps_outer_writes() {
        let driver = MemoryDriver::created();
        driver.begin().unwrap();
        driver.insert(Table::Words, word("outer")).unwrap();

        driver.begin().unwrap();
        driver.insert(Table::Words, word("inner")).unwrap();
        driver.rollback().unwrap();
        assert!(driver.in_transaction());

        driver.commit().unwrap();
        let rows = driver.rows(Table::Words);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("word").unwrap(), "outer");
    }

    #[test]
    fn memory_outer_rollback_discards_committed_savepoint() {
        let driver = MemoryDriver::created();
        driver.begin().unwrap();
        driver.begin().unwrap();
        driver.insert(Table::Words, word("inner")).unwrap();
        driver.commit().unwrap();
        driver.rollback().unwrap();
        assert!(driver.rows(Table::Words).is_empty());
    }

    #[test]
    fn memory_commit_without_transaction_fails() {
        let driver = MemoryDriver::created();
        assert_eq!(driver.commit(), Err(StorageError::NoActiveTransaction));
        assert_eq!(driver.rollback(), Err(StorageError::NoActiveTransaction));
    }

    #[test]
    fn memory_begin_requires_store() {
        let driver = MemoryDriver::new();
        assert_eq!(driver.begin(), Err(StorageError::NotCreated));
    }

    #[test]
    fn memory_other_threads_wait_for_transaction() {
        let driver = Arc::new(MemoryDriver::created());
        driver.begin().unwrap();
        driver.insert(Table::Words, word("pending")).unwrap();

        let observed = Arc::new(AtomicBool::new(false));
        let handle = {
            let driver = Arc::clone(&driver);
            let observed = Arc::clone(&observed);
            thread::spawn(move || {
                let count = driver.count(Table::Words);
                observed.store(true, Ordering::SeqCst);
                count
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!observed.load(Ordering::SeqCst));

        driver.rollback().unwrap();
        assert_eq!(handle.join().unwrap(), 0);
    }

    #[test]
    fn memory_owner_sees_uncommitted_rows() {
        let driver = Arc::new(MemoryDriver::created());
        driver.begin().unwrap();
        driver.insert(Table::Words, word("pending")).unwrap();
        assert_eq!(driver.rows(Table::Words).len(), 1);
        assert_eq!(driver.dump()[&Table::Words].len(), 1);

        let other = {
            let driver = Arc::clone(&driver);
            thread::spawn(move || driver.rows(Table::Words).len())
        };
        driver.rollback().unwrap();
        assert_eq!(other.join().unwrap(), 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(Table, i64),
        Update(Table, u64, i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let table = prop::sample::select(Table::ALL.to_vec());
        prop_oneof![
            (table.clone(), any::<i64>()).prop_map(|(t, n)| Op::Insert(t, n)),
            (table, 1..6u64, any::<i64>()).prop_map(|(t, id, n)| Op::Update(t, id, n)),
        ]
    }

    fn apply(driver: &MemoryDriver, op: &Op) {
        let row = |n: i64| {
            let mut attributes = Attributes::new();
            attributes.insert("n".into(), Value::Integer(n));
            attributes
        };
        match op {
            Op::Insert(table, n) => {
                driver.insert(*table, row(*n)).unwrap();
            }
            Op::Update(table, id, n) => {
                // Unknown ids fail without writing anything.
                let _ = driver.update(*table, *id, row(*n));
            }
        }
    }

    proptest! {
        #[test]
        fn memory_rollback_restores_everything(
            committed in prop::collection::vec(op_strategy(), 0..20),
            discarded in prop::collection::vec(op_strategy(), 0..20),
        ) {
            let driver = MemoryDriver::created();
            for op in &committed {
                apply(&driver, op);
            }
            let before = driver.dump();

            driver.begin().unwrap();
            for op in &discarded {
                apply(&driver, op);
            }
            driver.rollback().unwrap();
            prop_assert_eq!(driver.dump(), before);

            // Id counters are restored too.
            let next = driver.insert(Table::Words, Attributes::new()).unwrap();
            prop_assert_eq!(next.id, driver.rows(Table::Words).len() as u64);
        }
    }
}
