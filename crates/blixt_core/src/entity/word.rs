//! Word and term entities.

use crate::entity::impl_entity;
use crate::types::{SchemaId, TermId, WordId};

/// A normalized token text, unique across the whole index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    id: Option<WordId>,
    text: String,
}

impl_entity!(Word, WordId);

impl Word {
    /// Creates a word that has not been persisted.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    /// Returns the normalized text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The usage of a word within one schema.
///
/// `field_count` is the number of fields of the schema the word has
/// occurred in. It never decreases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    id: Option<TermId>,
    schema_id: SchemaId,
    word_id: WordId,
    field_count: u64,
}

impl_entity!(Term, TermId);

impl Term {
    /// Creates a term that has not been persisted.
    #[must_use]
    pub fn new(schema_id: SchemaId, word_id: WordId, field_count: u64) -> Self {
        Self {
            id: None,
            schema_id,
            word_id,
            field_count,
        }
    }

    /// Returns the owning schema.
    #[must_use]
    pub fn schema_id(&self) -> SchemaId {
        self.schema_id
    }

    /// Returns the word this term counts.
    #[must_use]
    pub fn word_id(&self) -> WordId {
        self.word_id
    }

    /// Returns the number of fields containing the word.
    #[must_use]
    pub fn field_count(&self) -> u64 {
        self.field_count
    }

    /// Returns the term counted in one more field.
    #[must_use]
    pub fn incremented(self) -> Self {
        Self {
            field_count: self.field_count.saturating_add(1),
            ..self
        }
    }
}
