//! Word and term repositories.

use super::{attributes, Repository};
use crate::entity::{Entity, Term, Word};
use crate::types::{SchemaId, TermId, WordId};
use blixt_storage::{Attributes, Conditions, Record, StorageDriver, StorageResult, Table};
use std::sync::Arc;

const WORD: &str = "word";
const SCHEMA_ID: &str = "schema_id";
const WORD_ID: &str = "word_id";
const FIELD_COUNT: &str = "field_count";

/// Repository of [`Word`] rows.
#[derive(Clone)]
pub struct WordRepository {
    driver: Arc<dyn StorageDriver>,
}

impl WordRepository {
    /// Creates a repository over the driver.
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Finds a word by its normalized text.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn find_by_text(&self, text: &str) -> StorageResult<Option<Word>> {
        self.find_by(&Conditions::new().eq(WORD, text))
    }
}

impl Repository for WordRepository {
    type Entity = Word;
    const TABLE: Table = Table::Words;

    fn driver(&self) -> &dyn StorageDriver {
        self.driver.as_ref()
    }

    fn to_attributes(word: &Word) -> Attributes {
        attributes([(WORD, word.text().into())])
    }

    fn to_entity(record: &Record) -> StorageResult<Word> {
        Ok(Word::new(record.text(WORD)?).with_id(WordId::new(record.id)))
    }
}

/// Repository of [`Term`] rows.
#[derive(Clone)]
pub struct TermRepository {
    driver: Arc<dyn StorageDriver>,
}

impl TermRepository {
    /// Creates a repository over the driver.
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Finds the term of a word within a schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn find_by_schema_and_word(
        &self,
        schema_id: SchemaId,
        word_id: WordId,
    ) -> StorageResult<Option<Term>> {
        self.find_by(
            &Conditions::new()
                .eq(SCHEMA_ID, schema_id)
                .eq(WORD_ID, word_id),
        )
    }

    /// Returns the terms of a schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn get_by_schema(&self, schema_id: SchemaId) -> StorageResult<Vec<Term>> {
        self.get_where(&Conditions::new().eq(SCHEMA_ID, schema_id), 0, None)
    }
}

impl Repository for TermRepository {
    type Entity = Term;
    const TABLE: Table = Table::Terms;

    fn driver(&self) -> &dyn StorageDriver {
        self.driver.as_ref()
    }

    fn to_attributes(term: &Term) -> Attributes {
        attributes([
            (SCHEMA_ID, term.schema_id().into()),
            (WORD_ID, term.word_id().into()),
            (FIELD_COUNT, term.field_count().into()),
        ])
    }

    fn to_entity(record: &Record) -> StorageResult<Term> {
        Ok(Term::new(
            SchemaId::new(record.unsigned(SCHEMA_ID)?),
            WordId::new(record.unsigned(WORD_ID)?),
            record.unsigned(FIELD_COUNT)?,
        )
        .with_id(TermId::new(record.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blixt_storage::MemoryDriver;

    #[test]
    fn find_word_by_text() {
        let repo = WordRepository::new(Arc::new(MemoryDriver::created()));
        let joe = repo.create(Word::new("joe")).unwrap();
        assert_eq!(repo.find_by_text("joe").unwrap(), Some(joe));
        assert_eq!(repo.find_by_text("jo").unwrap(), None);
    }

    #[test]
    fn term_update_persists_field_count() {
        let repo = TermRepository::new(Arc::new(MemoryDriver::created()));
        let term = repo
            .create(Term::new(SchemaId::new(1), WordId::new(1), 1))
            .unwrap();
        repo.update(term.incremented()).unwrap();

        let found = repo
            .find_by_schema_and_word(SchemaId::new(1), WordId::new(1))
            .unwrap()
            .unwrap();
        assert_eq!(found.field_count(), 2);
        assert_eq!(
            repo.find_by_schema_and_word(SchemaId::new(2), WordId::new(1))
                .unwrap(),
            None
        );
    }
}
