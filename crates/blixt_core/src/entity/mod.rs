//! Entities of the inverted-index data model.
//!
//! Entities are plain value types. They are constructed without an id;
//! the storage-assigned id is attached once, by the repository that
//! persists them, through [`Entity::with_id`].

mod document;
mod occurrence;
mod schema;
mod word;

pub use document::{Document, Field};
pub use occurrence::{Occurrence, Position};
pub use schema::{Column, Schema};
pub use word::{Term, Word};

use blixt_storage::RecordId;

/// A value type that maps onto one storage table row.
pub trait Entity: Clone + Send + Sync {
    /// Typed identifier of the entity.
    type Id: Copy + From<RecordId> + Into<RecordId>;

    /// Returns the storage-assigned id, if the entity has been persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Returns the entity with its storage-assigned id attached.
    #[must_use]
    fn with_id(self, id: Self::Id) -> Self;
}

macro_rules! impl_entity {
    ($entity:ty, $id:ty) => {
        impl $crate::entity::Entity for $entity {
            type Id = $id;

            fn id(&self) -> Option<$id> {
                self.id
            }

            fn with_id(mut self, id: $id) -> Self {
                self.id = Some(id);
                self
            }
        }
    };
}

pub(crate) use impl_entity;
