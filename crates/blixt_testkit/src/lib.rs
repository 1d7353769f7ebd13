//! # Blixt Testkit
//!
//! Test utilities for Blixt.
//!
//! This crate provides:
//! - Fixtures: the `people` blueprint, sample documents and a ready-made
//!   memory-backed index
//! - Property-based test generators using proptest
//! - Concurrent ingestion stress helpers
//!
//! ## Usage
//!
//! ```rust
//! use blixt_testkit::prelude::*;
//!
//! with_people_index(|test| {
//!     test.index.add(&joe_bloggs()).unwrap();
//!     assert_eq!(test.count(blixt_storage::Table::Words), 2);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use stress::*;
