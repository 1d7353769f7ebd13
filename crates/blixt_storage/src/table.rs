//! Logical table identifiers.

use std::fmt;

/// One of the fixed logical tables of an index.
///
/// Tables are a closed set; drivers may map them to whatever physical
/// layout they like but must keep ids independent per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
    /// Named document types.
    Schemas,
    /// Column declarations of a schema.
    Columns,
    /// Ingested documents.
    Documents,
    /// Per-column values of a document.
    Fields,
    /// Globally unique normalized words.
    Words,
    /// Per-schema usage of a word.
    Terms,
    /// Per-field frequency of a term.
    Occurrences,
    /// Token positions backing an occurrence.
    Positions,
}

impl Table {
    /// All tables, in dependency order.
    pub const ALL: [Table; 8] = [
        Table::Schemas,
        Table::Columns,
        Table::Documents,
        Table::Fields,
        Table::Words,
        Table::Terms,
        Table::Occurrences,
        Table::Positions,
    ];

    /// Returns the stable name of the table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Table::Schemas => "schemas",
            Table::Columns => "columns",
            Table::Documents => "documents",
            Table::Fields => "fields",
            Table::Words => "words",
            Table::Terms => "terms",
            Table::Occurrences => "occurrences",
            Table::Positions => "positions",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
