//! Read path over the inverted index.
//!
//! Resolves words to their postings the way a query engine would: word,
//! then this schema's term, then occurrences with their fields, documents
//! and positions. There is no ranking and no query language here.

use crate::analysis::Analyzer;
use crate::entity::{Document, Schema};
use crate::error::CoreResult;
use crate::repository::{
    DocumentRepository, OccurrenceRepository, Repository, TermRepository, WordRepository,
};
use crate::storage::Storage;
use crate::types::{DocumentId, SchemaId};
use blixt_storage::{StorageError, Table, Value};

/// One field a term occurs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Key of the document owning the field.
    pub document_key: Value,
    /// Name of the field's column.
    pub column: String,
    /// Number of tokens in the field that stem to the word.
    pub frequency: u64,
    /// Token positions, ascending.
    pub positions: Vec<u32>,
}

/// Everything the index knows about one word within a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPostings {
    /// The stemmed word.
    pub word: String,
    /// Number of fields of the schema the word occurs in.
    pub field_count: u64,
    /// Postings in ingestion order.
    pub postings: Vec<Posting>,
}

/// A document with the values of its stored columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// The document key.
    pub key: Value,
    /// `(column name, value)` for every stored column, in column order.
    pub values: Vec<(String, Value)>,
}

impl StoredDocument {
    /// Returns the stored value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

/// Reads postings and stored values of one schema.
#[derive(Debug, Clone)]
pub struct IndexReader {
    schema: Schema,
    schema_id: SchemaId,
    storage: Storage,
    analyzer: Analyzer,
}

impl IndexReader {
    /// Creates a reader for a persisted schema.
    pub(crate) fn new(
        schema: Schema,
        schema_id: SchemaId,
        storage: Storage,
        analyzer: Analyzer,
    ) -> Self {
        Self {
            schema,
            schema_id,
            storage,
            analyzer,
        }
    }

    /// Analyzes the text and returns the postings of each distinct word
    /// the schema knows about, in order of first occurrence in the text.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or the stored graph is
    /// inconsistent.
    pub fn lookup(&self, text: &str) -> CoreResult<Vec<TermPostings>> {
        let mut results = Vec::new();
        for group in self.analyzer.analyze(text) {
            if let Some(postings) = self.lookup_word(&group.word)? {
                results.push(postings);
            }
        }
        Ok(results)
    }

    /// Returns the postings of an already stemmed word.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or the stored graph is
    /// inconsistent.
    pub fn lookup_word(&self, word: &str) -> CoreResult<Option<TermPostings>> {
        let storage = &self.storage;
        let Some(word) = storage.words().find_by_text(word)? else {
            return Ok(None);
        };
        let word_id = WordRepository::id_of(&word)?;
        let Some(term) = storage.terms().find_by_schema_and_word(self.schema_id, word_id)? else {
            return Ok(None);
        };
        let term_id = TermRepository::id_of(&term)?;

        let mut postings = Vec::new();
        for occurrence in storage.occurrences().get_by_terms(&[term_id])? {
            let field = storage.fields().find(occurrence.field_id())?.ok_or(
                StorageError::RecordNotFound {
                    table: Table::Fields,
                    id: occurrence.field_id().as_u64(),
                },
            )?;
            let document = self.document(field.document_id())?;
            let column = self
                .schema
                .column_by_id(field.column_id())
                .map(|c| c.name().to_string())
                .ok_or(StorageError::RecordNotFound {
                    table: Table::Columns,
                    id: field.column_id().as_u64(),
                })?;
            let occurrence_id = OccurrenceRepository::id_of(&occurrence)?;
            let positions = storage
                .positions()
                .get_by_occurrence(occurrence_id)?
                .iter()
                .map(|p| p.position())
                .collect();

            postings.push(Posting {
                document_key: document.key().clone(),
                column,
                frequency: occurrence.frequency(),
                positions,
            });
        }

        Ok(Some(TermPostings {
            word: word.text().to_string(),
            field_count: term.field_count(),
            postings,
        }))
    }

    /// Returns the stored values of the document with the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn get(&self, key: &Value) -> CoreResult<Option<StoredDocument>> {
        let storage = &self.storage;
        let Some(document) = storage.documents().find_by_key(self.schema_id, key)? else {
            return Ok(None);
        };
        let document_id = DocumentRepository::id_of(&document)?;
        let values = storage
            .fields()
            .get_by_document(document_id)?
            .into_iter()
            .filter_map(|field| {
                let column = self.schema.column_by_id(field.column_id())?;
                column
                    .is_stored()
                    .then(|| (column.name().to_string(), field.value().clone()))
            })
            .collect();
        Ok(Some(StoredDocument {
            key: document.key().clone(),
            values,
        }))
    }

    /// Returns the number of documents in the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn document_count(&self) -> CoreResult<usize> {
        Ok(self
            .storage
            .documents()
            .get_by_schema(self.schema_id, 0, None)?
            .len())
    }

    fn document(&self, id: DocumentId) -> CoreResult<Document> {
        Ok(self
            .storage
            .documents()
            .find(id)?
            .ok_or(StorageError::RecordNotFound {
                table: Table::Documents,
                id: id.as_u64(),
            })?)
    }
}
