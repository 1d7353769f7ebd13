//! CLI command implementations.

pub mod load;
pub mod lookup;
pub mod stats;

use blixt_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("cannot read {path:?}: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// An input file is not valid JSON of the expected shape.
    #[error("{path:?} line {line}: {source}")]
    Json {
        /// The file.
        path: PathBuf,
        /// 1-based line number (1 for whole-file JSON).
        line: usize,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// A document key is neither an integer nor a string.
    #[error("{path:?} line {line}: document key must be an integer or a string")]
    InvalidKey {
        /// The file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
    },

    /// The index could not be set up.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A document failed to ingest.
    #[error("{path:?} line {line}: {source}")]
    Ingest {
        /// The file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Underlying error.
        source: CoreError,
    },
}
