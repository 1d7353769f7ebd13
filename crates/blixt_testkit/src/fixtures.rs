//! Test fixtures and index helpers.

use blixt_core::{Blixt, Blueprint, Config, Index, Indexable};
use blixt_storage::{MemoryDriver, Record, Table};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The `people` blueprint: `name` indexed, `age` stored.
pub fn people_blueprint() -> Blueprint {
    Blueprint::new("people").indexed("name").stored("age")
}

/// Joe Bloggs, key 1.
pub fn joe_bloggs() -> Indexable {
    Indexable::new(1).field("name", "Joe Bloggs").field("age", 30)
}

/// Jane Doe, key 2.
pub fn jane_doe() -> Indexable {
    Indexable::new(2).field("name", "Jane Doe").field("age", 28)
}

/// A memory-backed index with direct access to the driver's tables.
pub struct TestIndex {
    /// The driver, for inspecting rows.
    pub driver: Arc<MemoryDriver>,
    /// The facade over the driver.
    pub blixt: Blixt,
    /// The index under test.
    pub index: Index,
}

impl TestIndex {
    /// Creates an index from a blueprint over a fresh memory driver.
    pub fn new(blueprint: &Blueprint) -> Self {
        Self::with_config(blueprint, Config::default())
    }

    /// Creates an index with a custom configuration.
    pub fn with_config(blueprint: &Blueprint, config: Config) -> Self {
        let driver = Arc::new(MemoryDriver::new());
        let blixt = Blixt::with_config(driver.clone(), config).expect("Failed to install store");
        let index = blixt.create(blueprint).expect("Failed to create index");
        Self {
            driver,
            blixt,
            index,
        }
    }

    /// Creates the `people` index.
    pub fn people() -> Self {
        Self::new(&people_blueprint())
    }

    /// Returns the number of rows in a table.
    pub fn count(&self, table: Table) -> usize {
        self.driver.count(table)
    }

    /// Returns a copy of every table.
    pub fn snapshot(&self) -> BTreeMap<Table, Vec<Record>> {
        self.driver.dump()
    }

    /// Returns the text of every word row, in id order.
    pub fn words(&self) -> Vec<String> {
        self.driver
            .rows(Table::Words)
            .iter()
            .map(|r| r.text("word").expect("word row without text").to_string())
            .collect()
    }

    /// Returns the field count of a word's term, if the index has one.
    pub fn field_count(&self, word: &str) -> Option<u64> {
        self.index
            .lookup(word)
            .expect("lookup failed")
            .into_iter()
            .find(|postings| postings.word == word)
            .map(|postings| postings.field_count)
    }
}

impl std::ops::Deref for TestIndex {
    type Target = Index;

    fn deref(&self) -> &Self::Target {
        &self.index
    }
}

/// Runs a test with a fresh `people` index.
///
/// # Example
///
/// ```rust
/// use blixt_testkit::{jane_doe, with_people_index};
///
/// with_people_index(|test| {
///     test.add(&jane_doe()).unwrap();
///     assert_eq!(test.field_count("doe"), Some(1));
/// });
/// ```
pub fn with_people_index<F, R>(f: F) -> R
where
    F: FnOnce(&TestIndex) -> R,
{
    let test = TestIndex::people();
    f(&test)
}
