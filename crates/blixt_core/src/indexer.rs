//! Document ingestion pipeline.
//!
//! Ingesting a document writes the whole entity graph below it: the
//! document row, one field per column, and for every indexed column the
//! words, terms, occurrences and positions of its tokens. Each document is
//! written inside its own transaction, so a failure at any step leaves no
//! trace of that document.
//!
//! Uniqueness of words and of `(schema, word)` terms is enforced here with
//! find-then-create sequences. These are check-then-act operations on
//! shared rows; they are safe only because the driver isolates the open
//! transaction from other writers until it ends.

use crate::analysis::{Analyzer, WordGroup};
use crate::entity::{Column, Document, Field, Occurrence, Position, Schema, Term, Word};
use crate::error::{CoreError, CoreResult};
use crate::indexable::Indexable;
use crate::repository::{
    ColumnRepository, DocumentRepository, FieldRepository, OccurrenceRepository, Repository,
    SchemaRepository, TermRepository, WordRepository,
};
use crate::storage::Storage;
use crate::types::{ColumnId, FieldId, SchemaId};
use blixt_storage::Value;

/// Writes documents into one schema.
#[derive(Debug, Clone)]
pub struct Indexer {
    schema: Schema,
    schema_id: SchemaId,
    columns: Vec<(ColumnId, Column)>,
    storage: Storage,
    analyzer: Analyzer,
}

impl Indexer {
    /// Creates an indexer for a persisted schema with its columns attached.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSchema`] if the schema or one of its
    /// columns has not been persisted, or if it has no columns.
    pub fn new(schema: Schema, storage: Storage, analyzer: Analyzer) -> CoreResult<Self> {
        let schema_id = SchemaRepository::id_of(&schema).map_err(|_| {
            CoreError::invalid_schema(format!("schema '{}' is not persisted", schema.name()))
        })?;
        if !schema.has_columns() {
            return Err(CoreError::invalid_schema(format!(
                "schema '{}' has no columns",
                schema.name()
            )));
        }
        let columns = schema
            .columns()
            .iter()
            .map(|column| {
                ColumnRepository::id_of(column)
                    .map(|id| (id, column.clone()))
                    .map_err(|_| {
                        CoreError::invalid_schema(format!(
                            "column '{}' of schema '{}' is not persisted",
                            column.name(),
                            schema.name()
                        ))
                    })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            schema,
            schema_id,
            columns,
            storage,
            analyzer,
        })
    }

    /// Returns the schema documents are written into.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Ingests one document atomically.
    ///
    /// # Errors
    ///
    /// - [`CoreError::DocumentAlreadyExists`] if the key is already used
    ///   in this schema
    /// - [`CoreError::InvalidDocument`] if a column has no value
    /// - [`CoreError::Storage`] if the driver fails
    ///
    /// In every case nothing of the document is stored.
    pub fn add(&self, indexable: &Indexable) -> CoreResult<Document> {
        tracing::debug!(
            schema = self.schema.name(),
            key = %indexable.key(),
            "indexing document"
        );
        let document = self.storage.transaction(|storage| {
            self.ensure_unique(storage, indexable.key())?;
            self.ensure_complete(indexable)?;
            self.write(storage, indexable)
        })?;
        tracing::debug!(
            schema = self.schema.name(),
            key = %indexable.key(),
            fields = self.columns.len(),
            "document indexed"
        );
        Ok(document)
    }

    /// Ingests documents one by one, each in its own transaction.
    ///
    /// Stops at the first failure. Documents ingested before it stay
    /// committed.
    ///
    /// # Errors
    ///
    /// Returns the error of the first document that fails.
    pub fn add_all<'a, I>(&self, indexables: I) -> CoreResult<Vec<Document>>
    where
        I: IntoIterator<Item = &'a Indexable>,
    {
        indexables
            .into_iter()
            .map(|indexable| self.add(indexable))
            .collect()
    }

    fn ensure_unique(&self, storage: &Storage, key: &Value) -> CoreResult<()> {
        if storage.documents().find_by_key(self.schema_id, key)?.is_some() {
            return Err(CoreError::document_already_exists(
                self.schema.name(),
                key.clone(),
            ));
        }
        Ok(())
    }

    fn ensure_complete(&self, indexable: &Indexable) -> CoreResult<()> {
        let missing: Vec<&str> = self
            .columns
            .iter()
            .map(|(_, column)| column.name())
            .filter(|name| !indexable.has(name))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::invalid_document(format!(
                "document {} is missing field(s) {} required by schema '{}'",
                indexable.key(),
                missing.join(", "),
                self.schema.name()
            )))
        }
    }

    fn write(&self, storage: &Storage, indexable: &Indexable) -> CoreResult<Document> {
        let document = storage
            .documents()
            .create(Document::new(self.schema_id, indexable.key().clone()))?;
        let document_id = DocumentRepository::id_of(&document)?;

        for (column_id, column) in &self.columns {
            let value = indexable.get(column.name()).cloned().unwrap_or_default();
            let stored = if column.is_stored() {
                value.clone()
            } else {
                Value::Null
            };
            let field = storage
                .fields()
                .create(Field::new(document_id, *column_id, stored))?;

            if column.is_indexed() {
                let field_id = FieldRepository::id_of(&field)?;
                self.index_field(storage, field_id, &value)?;
            }
        }
        Ok(document)
    }

    fn index_field(&self, storage: &Storage, field_id: FieldId, value: &Value) -> CoreResult<()> {
        let Some(text) = value.as_text() else {
            return Ok(());
        };
        for group in self.analyzer.analyze(&text) {
            self.index_word(storage, field_id, &group)?;
        }
        Ok(())
    }

    fn index_word(&self, storage: &Storage, field_id: FieldId, group: &WordGroup) -> CoreResult<()> {
        let word = match storage.words().find_by_text(&group.word)? {
            Some(word) => word,
            None => {
                tracing::trace!(word = %group.word, "creating word");
                storage.words().create(Word::new(group.word.as_str()))?
            }
        };
        let word_id = WordRepository::id_of(&word)?;

        let term = match storage
            .terms()
            .find_by_schema_and_word(self.schema_id, word_id)?
        {
            Some(term) => {
                tracing::trace!(
                    word = %group.word,
                    field_count = term.field_count().saturating_add(1),
                    "incrementing term"
                );
                storage.terms().update(term.incremented())?
            }
            None => {
                tracing::trace!(word = %group.word, "creating term");
                storage.terms().create(Term::new(self.schema_id, word_id, 1))?
            }
        };
        let term_id = TermRepository::id_of(&term)?;

        let occurrence = storage
            .occurrences()
            .create(Occurrence::new(field_id, term_id, group.frequency()))?;
        let occurrence_id = OccurrenceRepository::id_of(&occurrence)?;

        for &position in &group.positions {
            storage
                .positions()
                .create(Position::new(occurrence_id, position))?;
        }
        Ok(())
    }
}
