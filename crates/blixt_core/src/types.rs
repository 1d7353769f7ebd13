//! Typed entity identifiers.

use blixt_storage::{RecordId, Value};
use std::fmt;

macro_rules! entity_ids {
    ($($(#[$meta:meta])* $name:ident => $prefix:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name(pub RecordId);

            impl $name {
                /// Creates a new ID.
                #[must_use]
                pub const fn new(id: RecordId) -> Self {
                    Self(id)
                }

                /// Returns the raw ID value.
                #[must_use]
                pub const fn as_u64(self) -> RecordId {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, ":{}"), self.0)
                }
            }

            impl From<RecordId> for $name {
                fn from(id: RecordId) -> Self {
                    Self(id)
                }
            }

            impl From<$name> for RecordId {
                fn from(id: $name) -> Self {
                    id.0
                }
            }

            impl From<$name> for Value {
                fn from(id: $name) -> Self {
                    Value::from(id.0)
                }
            }
        )*
    };
}

entity_ids! {
    /// Identifier of a schema.
    SchemaId => "schema",
    /// Identifier of a column.
    ColumnId => "column",
    /// Identifier of a document.
    DocumentId => "document",
    /// Identifier of a field.
    FieldId => "field",
    /// Identifier of a word.
    WordId => "word",
    /// Identifier of a term.
    TermId => "term",
    /// Identifier of an occurrence.
    OccurrenceId => "occurrence",
    /// Identifier of a position.
    PositionId => "position",
}
