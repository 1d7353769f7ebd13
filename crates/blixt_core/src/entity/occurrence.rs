//! Occurrence and position entities.

use crate::entity::impl_entity;
use crate::types::{FieldId, OccurrenceId, PositionId, TermId};

/// The aggregated appearances of a term within one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    id: Option<OccurrenceId>,
    field_id: FieldId,
    term_id: TermId,
    frequency: u64,
}

impl_entity!(Occurrence, OccurrenceId);

impl Occurrence {
    /// Creates an occurrence that has not been persisted.
    #[must_use]
    pub fn new(field_id: FieldId, term_id: TermId, frequency: u64) -> Self {
        Self {
            id: None,
            field_id,
            term_id,
            frequency,
        }
    }

    /// Returns the field the term occurs in.
    #[must_use]
    pub fn field_id(&self) -> FieldId {
        self.field_id
    }

    /// Returns the term.
    #[must_use]
    pub fn term_id(&self) -> TermId {
        self.term_id
    }

    /// Returns how many tokens of the field stem to the term's word.
    #[must_use]
    pub fn frequency(&self) -> u64 {
        self.frequency
    }
}

/// One token location backing an occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    id: Option<PositionId>,
    occurrence_id: OccurrenceId,
    position: u32,
}

impl_entity!(Position, PositionId);

impl Position {
    /// Creates a position that has not been persisted.
    #[must_use]
    pub fn new(occurrence_id: OccurrenceId, position: u32) -> Self {
        Self {
            id: None,
            occurrence_id,
            position,
        }
    }

    /// Returns the owning occurrence.
    #[must_use]
    pub fn occurrence_id(&self) -> OccurrenceId {
        self.occurrence_id
    }

    /// Returns the 0-based token index within the field.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }
}
