//! Typed repositories over the storage driver.
//!
//! Every entity kind has exactly one repository. A repository translates
//! between its entity and generic attribute rows and adds a few
//! specialised lookups. Repositories never deduplicate: uniqueness of
//! words, terms and documents is enforced by the indexer through explicit
//! find-then-create sequences.

mod document;
mod occurrence;
mod schema;
mod word;

pub use document::{DocumentRepository, FieldRepository};
pub use occurrence::{OccurrenceRepository, PositionRepository};
pub use schema::{ColumnRepository, SchemaRepository};
pub use word::{TermRepository, WordRepository};

use crate::entity::Entity;
use blixt_storage::{
    Attributes, Conditions, Record, StorageDriver, StorageError, StorageResult, Table,
};

/// Common storage capability of all repositories.
///
/// Implementors provide the table, the driver and the two mapping
/// functions; the CRUD operations are shared.
pub trait Repository {
    /// The entity stored by this repository.
    type Entity: Entity;

    /// The table backing this repository.
    const TABLE: Table;

    /// Returns the driver rows are read from and written to.
    fn driver(&self) -> &dyn StorageDriver;

    /// Converts an entity into row attributes (the id is not an attribute).
    fn to_attributes(entity: &Self::Entity) -> Attributes;

    /// Builds an entity from a row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidRecord`] if the row is malformed.
    fn to_entity(record: &Record) -> StorageResult<Self::Entity>;

    /// Returns the id of a persisted entity.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::MissingId`] if the entity has no id.
    fn id_of(entity: &Self::Entity) -> StorageResult<<Self::Entity as Entity>::Id> {
        entity
            .id()
            .ok_or(StorageError::MissingId { table: Self::TABLE })
    }

    /// Finds an entity by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or the row is malformed.
    fn find(&self, id: <Self::Entity as Entity>::Id) -> StorageResult<Option<Self::Entity>> {
        self.driver()
            .find(Self::TABLE, id.into())?
            .map(|record| Self::to_entity(&record))
            .transpose()
    }

    /// Finds the first entity matching the conditions.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or the row is malformed.
    fn find_by(&self, conditions: &Conditions) -> StorageResult<Option<Self::Entity>> {
        self.driver()
            .find_by(Self::TABLE, conditions)?
            .map(|record| Self::to_entity(&record))
            .transpose()
    }

    /// Returns the entities matching the conditions, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or a row is malformed.
    fn get_where(
        &self,
        conditions: &Conditions,
        offset: usize,
        limit: Option<usize>,
    ) -> StorageResult<Vec<Self::Entity>> {
        self.driver()
            .get_where(Self::TABLE, conditions, offset, limit)?
            .iter()
            .map(Self::to_entity)
            .collect()
    }

    /// Returns all entities, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or a row is malformed.
    fn all(&self, offset: usize, limit: Option<usize>) -> StorageResult<Vec<Self::Entity>> {
        self.get_where(&Conditions::new(), offset, limit)
    }

    /// Inserts the entity as a new row and returns it with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    fn create(&self, entity: Self::Entity) -> StorageResult<Self::Entity> {
        let record = self
            .driver()
            .insert(Self::TABLE, Self::to_attributes(&entity))?;
        Ok(entity.with_id(record.id.into()))
    }

    /// Overwrites the row of an already persisted entity.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::MissingId`] if the entity has no id, or
    /// [`StorageError::RecordNotFound`] if its row does not exist.
    fn update(&self, entity: Self::Entity) -> StorageResult<Self::Entity> {
        let id = Self::id_of(&entity)?;
        self.driver()
            .update(Self::TABLE, id.into(), Self::to_attributes(&entity))?;
        Ok(entity)
    }

    /// Creates the entity if it has no id, otherwise updates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    fn save(&self, entity: Self::Entity) -> StorageResult<Self::Entity> {
        if entity.id().is_some() {
            self.update(entity)
        } else {
            self.create(entity)
        }
    }
}

/// Builds an attribute map from `(name, value)` pairs.
fn attributes<const N: usize>(pairs: [(&str, blixt_storage::Value); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Word;
    use crate::types::WordId;
    use blixt_storage::MemoryDriver;
    use std::sync::Arc;

    fn words() -> WordRepository {
        WordRepository::new(Arc::new(MemoryDriver::created()))
    }

    #[test]
    fn create_assigns_id() {
        let repo = words();
        let word = repo.create(Word::new("joe")).unwrap();
        assert_eq!(word.id(), Some(WordId::new(1)));
        assert_eq!(repo.find(WordId::new(1)).unwrap(), Some(word));
    }

    #[test]
    fn create_does_not_deduplicate() {
        let repo = words();
        repo.create(Word::new("joe")).unwrap();
        repo.create(Word::new("joe")).unwrap();
        assert_eq!(repo.all(0, None).unwrap().len(), 2);
    }

    #[test]
    fn save_creates_then_updates() {
        let repo = words();
        let word = repo.save(Word::new("joe")).unwrap();
        assert_eq!(word.id(), Some(WordId::new(1)));

        let renamed = repo.save(Word::new("jo").with_id(WordId::new(1))).unwrap();
        assert_eq!(renamed.id(), Some(WordId::new(1)));
        assert_eq!(repo.all(0, None).unwrap(), vec![renamed]);
    }

    #[test]
    fn update_without_id_fails() {
        let repo = words();
        assert_eq!(
            repo.update(Word::new("joe")),
            Err(StorageError::MissingId { table: Table::Words })
        );
    }

    #[test]
    fn update_unknown_row_fails() {
        let repo = words();
        let result = repo.update(Word::new("joe").with_id(WordId::new(7)));
        assert!(matches!(result, Err(StorageError::RecordNotFound { .. })));
    }

    #[test]
    fn get_where_pages() {
        let repo = words();
        for text in ["a", "b", "c", "d"] {
            repo.create(Word::new(text)).unwrap();
        }
        let page: Vec<_> = repo
            .all(1, Some(2))
            .unwrap()
            .into_iter()
            .map(|w| w.text().to_string())
            .collect();
        assert_eq!(page, vec!["b", "c"]);
    }
}
