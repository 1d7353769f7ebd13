//! Handle on one schema of the store.

use crate::analysis::Analyzer;
use crate::entity::{Document, Schema};
use crate::error::CoreResult;
use crate::indexable::Indexable;
use crate::indexer::Indexer;
use crate::reader::{IndexReader, StoredDocument, TermPostings};
use crate::repository::{Repository, SchemaRepository};
use crate::storage::Storage;
use blixt_storage::Value;

/// An index bound to one schema.
///
/// Obtained from [`crate::Blixt::create`] or [`crate::Blixt::open`].
#[derive(Debug, Clone)]
pub struct Index {
    indexer: Indexer,
    reader: IndexReader,
}

impl Index {
    /// Binds an index to a persisted schema with its columns attached.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidSchema`] if the schema cannot
    /// back an index.
    pub fn new(schema: Schema, storage: Storage, analyzer: Analyzer) -> CoreResult<Self> {
        let indexer = Indexer::new(schema.clone(), storage.clone(), analyzer.clone())?;
        let schema_id = SchemaRepository::id_of(&schema)?;
        let reader = IndexReader::new(schema, schema_id, storage, analyzer);
        Ok(Self { indexer, reader })
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        self.indexer.schema()
    }

    /// Ingests one document atomically.
    ///
    /// # Errors
    ///
    /// See [`Indexer::add`].
    pub fn add(&self, indexable: &Indexable) -> CoreResult<Document> {
        self.indexer.add(indexable)
    }

    /// Ingests documents one by one; not atomic as a batch.
    ///
    /// # Errors
    ///
    /// See [`Indexer::add_all`].
    pub fn add_all<'a, I>(&self, indexables: I) -> CoreResult<Vec<Document>>
    where
        I: IntoIterator<Item = &'a Indexable>,
    {
        self.indexer.add_all(indexables)
    }

    /// Returns the postings of each known word in the text.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn lookup(&self, text: &str) -> CoreResult<Vec<TermPostings>> {
        self.reader.lookup(text)
    }

    /// Returns the stored values of a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn get(&self, key: impl Into<Value>) -> CoreResult<Option<StoredDocument>> {
        self.reader.get(&key.into())
    }

    /// Returns the number of documents in the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn document_count(&self) -> CoreResult<usize> {
        self.reader.document_count()
    }

    /// Returns the reader of this index.
    #[must_use]
    pub fn reader(&self) -> &IndexReader {
        &self.reader
    }
}
