//! # Blixt Core
//!
//! Document ingestion pipeline and inverted-index model for Blixt.
//!
//! This crate provides:
//! - The entity model: schemas, columns, documents, fields, words, terms,
//!   occurrences and positions
//! - One typed repository per entity over any [`blixt_storage::StorageDriver`]
//! - The [`Indexer`], which writes each document atomically
//! - Tokenizer and stemmer capabilities
//! - The [`Blixt`] facade and per-schema [`Index`] handles with a term
//!   lookup read path
//!
//! ## Example
//!
//! ```rust
//! use blixt_core::{Blixt, Blueprint, Config, Indexable};
//! use blixt_storage::MemoryDriver;
//! use std::sync::Arc;
//!
//! let blixt = Blixt::with_config(Arc::new(MemoryDriver::new()), Config::default()).unwrap();
//! let people = blixt
//!     .open_or_create("people", |b| b.indexed("name").stored("age"))
//!     .unwrap();
//!
//! people
//!     .add(&Indexable::new(1).field("name", "Joe Bloggs").field("age", 30))
//!     .unwrap();
//! people
//!     .add(&Indexable::new(2).field("name", "Jane Bloggs").field("age", 28))
//!     .unwrap();
//!
//! let bloggs = &people.lookup("Bloggs").unwrap()[0];
//! assert_eq!(bloggs.field_count, 2);
//! assert_eq!(bloggs.postings.len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
mod blixt;
mod blueprint;
mod config;
pub mod entity;
mod error;
mod index;
mod indexable;
mod indexer;
mod reader;
pub mod repository;
mod storage;
mod types;

pub use analysis::{
    Analyzer, DefaultTokenizer, IdentityStemmer, Stemmer, Token, Tokenizer, TokenizerConfig,
};
pub use blixt::Blixt;
pub use blueprint::{Blueprint, Definition};
pub use config::Config;
pub use entity::{Column, Document, Entity, Field, Occurrence, Position, Schema, Term, Word};
pub use error::{CoreError, CoreResult};
pub use index::Index;
pub use indexable::Indexable;
pub use indexer::Indexer;
pub use reader::{IndexReader, Posting, StoredDocument, TermPostings};
pub use repository::Repository;
pub use storage::Storage;
pub use types::{
    ColumnId, DocumentId, FieldId, OccurrenceId, PositionId, SchemaId, TermId, WordId,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
