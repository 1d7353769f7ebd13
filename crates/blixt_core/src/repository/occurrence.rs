//! Occurrence and position repositories.

use super::{attributes, Repository};
use crate::entity::{Entity, Occurrence, Position};
use crate::types::{FieldId, OccurrenceId, PositionId, TermId};
use blixt_storage::{Attributes, Conditions, Record, StorageDriver, StorageResult, Table};
use std::sync::Arc;

const FIELD_ID: &str = "field_id";
const TERM_ID: &str = "term_id";
const FREQUENCY: &str = "frequency";
const OCCURRENCE_ID: &str = "occurrence_id";
const POSITION: &str = "position";

/// Repository of [`Occurrence`] rows.
#[derive(Clone)]
pub struct OccurrenceRepository {
    driver: Arc<dyn StorageDriver>,
}

impl OccurrenceRepository {
    /// Creates a repository over the driver.
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Returns the occurrences of any of the given terms, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn get_by_terms(&self, term_ids: &[TermId]) -> StorageResult<Vec<Occurrence>> {
        if term_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.get_where(
            &Conditions::new().any_of(TERM_ID, term_ids.iter().copied()),
            0,
            None,
        )
    }

    /// Returns the occurrences recorded for a field.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn get_by_field(&self, field_id: FieldId) -> StorageResult<Vec<Occurrence>> {
        self.get_where(&Conditions::new().eq(FIELD_ID, field_id), 0, None)
    }
}

impl Repository for OccurrenceRepository {
    type Entity = Occurrence;
    const TABLE: Table = Table::Occurrences;

    fn driver(&self) -> &dyn StorageDriver {
        self.driver.as_ref()
    }

    fn to_attributes(occurrence: &Occurrence) -> Attributes {
        attributes([
            (FIELD_ID, occurrence.field_id().into()),
            (TERM_ID, occurrence.term_id().into()),
            (FREQUENCY, occurrence.frequency().into()),
        ])
    }

    fn to_entity(record: &Record) -> StorageResult<Occurrence> {
        Ok(Occurrence::new(
            FieldId::new(record.unsigned(FIELD_ID)?),
            TermId::new(record.unsigned(TERM_ID)?),
            record.unsigned(FREQUENCY)?,
        )
        .with_id(OccurrenceId::new(record.id)))
    }
}

/// Repository of [`Position`] rows.
#[derive(Clone)]
pub struct PositionRepository {
    driver: Arc<dyn StorageDriver>,
}

impl PositionRepository {
    /// Creates a repository over the driver.
    pub fn new(driver: Arc<dyn StorageDriver>) -> Self {
        Self { driver }
    }

    /// Returns the positions of an occurrence in ascending token order.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn get_by_occurrence(&self, occurrence_id: OccurrenceId) -> StorageResult<Vec<Position>> {
        let mut positions =
            self.get_where(&Conditions::new().eq(OCCURRENCE_ID, occurrence_id), 0, None)?;
        positions.sort_by_key(Position::position);
        Ok(positions)
    }
}

impl Repository for PositionRepository {
    type Entity = Position;
    const TABLE: Table = Table::Positions;

    fn driver(&self) -> &dyn StorageDriver {
        self.driver.as_ref()
    }

    fn to_attributes(position: &Position) -> Attributes {
        attributes([
            (OCCURRENCE_ID, position.occurrence_id().into()),
            (POSITION, position.position().into()),
        ])
    }

    fn to_entity(record: &Record) -> StorageResult<Position> {
        Ok(Position::new(
            OccurrenceId::new(record.unsigned(OCCURRENCE_ID)?),
            record.unsigned32(POSITION)?,
        )
        .with_id(PositionId::new(record.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blixt_storage::MemoryDriver;

    #[test]
    fn occurrences_by_terms() {
        let repo = OccurrenceRepository::new(Arc::new(MemoryDriver::created()));
        repo.create(Occurrence::new(FieldId::new(1), TermId::new(1), 1)).unwrap();
        repo.create(Occurrence::new(FieldId::new(1), TermId::new(2), 2)).unwrap();
        repo.create(Occurrence::new(FieldId::new(2), TermId::new(3), 1)).unwrap();

        let found = repo.get_by_terms(&[TermId::new(1), TermId::new(3)]).unwrap();
        let terms: Vec<_> = found.iter().map(Occurrence::term_id).collect();
        assert_eq!(terms, vec![TermId::new(1), TermId::new(3)]);
        assert!(repo.get_by_terms(&[]).unwrap().is_empty());
        assert_eq!(repo.get_by_field(FieldId::new(1)).unwrap().len(), 2);
    }

    #[test]
    fn positions_come_back_sorted() {
        let repo = PositionRepository::new(Arc::new(MemoryDriver::created()));
        let occurrence = OccurrenceId::new(1);
        repo.create(Position::new(occurrence, 4)).unwrap();
        repo.create(Position::new(occurrence, 1)).unwrap();

        let positions: Vec<_> = repo
            .get_by_occurrence(occurrence)
            .unwrap()
            .iter()
            .map(Position::position)
            .collect();
        assert_eq!(positions, vec![1, 4]);
    }
}
