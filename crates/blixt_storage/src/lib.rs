//! # Blixt Storage
//!
//! Storage driver contract and reference implementation for Blixt.
//!
//! This crate is the lowest layer of the index. Drivers are **generic row
//! stores**: they know about eight fixed logical tables and rows made of an
//! id plus a set of named attributes, but nothing about words, terms or
//! documents. All domain consistency lives above this layer.
//!
//! ## Design Principles
//!
//! - Rows are `{id, attributes}`; ids are assigned by the driver
//! - No implicit upserts or uniqueness checks
//! - Transactions are explicit `begin` / `commit` / `rollback` primitives
//! - Must be `Send + Sync` for concurrent access
//!
//! ## Available Drivers
//!
//! - [`MemoryDriver`] - In-memory tables, for tests and ephemeral indexes
//!
//! ## Example
//!
//! ```rust
//! use blixt_storage::{Attributes, Conditions, MemoryDriver, StorageDriver, Table, Value};
//!
//! let driver = MemoryDriver::new();
//! driver.create().unwrap();
//!
//! let mut attributes = Attributes::new();
//! attributes.insert("word".into(), Value::from("joe"));
//! let record = driver.insert(Table::Words, attributes).unwrap();
//! assert_eq!(record.id, 1);
//!
//! let found = driver
//!     .find_by(Table::Words, &Conditions::new().eq("word", "joe"))
//!     .unwrap();
//! assert_eq!(found.map(|r| r.id), Some(1));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod conditions;
mod driver;
mod error;
mod memory;
mod record;
mod table;
mod value;

pub use conditions::{Condition, Conditions};
pub use driver::StorageDriver;
pub use error::{StorageError, StorageResult};
pub use memory::MemoryDriver;
pub use record::{Attributes, Record, RecordId};
pub use table::Table;
pub use value::Value;
