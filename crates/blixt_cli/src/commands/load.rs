//! Loading of blueprint and document files.

use super::CliError;
use blixt_core::{Blixt, Blueprint, Config, Index, Indexable};
use blixt_storage::{MemoryDriver, Value};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Blueprint file contents.
#[derive(Debug, Deserialize)]
pub struct BlueprintFile {
    /// Schema name.
    pub name: String,
    /// Column declarations in order.
    pub columns: Vec<ColumnFile>,
}

/// One column declaration of a blueprint file.
#[derive(Debug, Deserialize)]
pub struct ColumnFile {
    /// Column name.
    pub name: String,
    /// Whether the column is indexed.
    #[serde(default)]
    pub indexed: bool,
    /// Whether the column is stored.
    #[serde(default)]
    pub stored: bool,
}

impl From<BlueprintFile> for Blueprint {
    fn from(file: BlueprintFile) -> Self {
        file.columns
            .into_iter()
            .fold(Blueprint::new(file.name), |blueprint, column| {
                blueprint.define(column.name, column.indexed, column.stored)
            })
    }
}

/// One line of a documents file.
#[derive(Debug, Deserialize)]
pub struct DocumentLine {
    /// Document key, an integer or a string.
    pub key: serde_json::Value,
    /// Field values by name.
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// A loaded in-memory index.
pub struct Loaded {
    /// The driver holding the tables.
    pub driver: Arc<MemoryDriver>,
    /// The index the documents were added to.
    pub index: Index,
    /// Number of documents ingested.
    pub documents: usize,
}

/// Converts a JSON value to a field value.
///
/// Floats, large unsigned numbers, arrays and objects become their JSON
/// text.
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Text(n.to_string()),
        },
        serde_json::Value::String(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    }
}

/// Converts a field value to JSON for output.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Text(s) => serde_json::Value::String(s.clone()),
    }
}

/// Parses a blueprint file's contents.
pub fn parse_blueprint(path: &Path, contents: &str) -> Result<Blueprint, CliError> {
    let file: BlueprintFile = serde_json::from_str(contents).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        line: 1,
        source,
    })?;
    Ok(file.into())
}

/// Parses one line of a documents file.
pub fn parse_document(path: &Path, line: usize, contents: &str) -> Result<Indexable, CliError> {
    let document: DocumentLine =
        serde_json::from_str(contents).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            line,
            source,
        })?;
    let key = match &document.key {
        serde_json::Value::Number(n) if n.is_i64() => json_to_value(&document.key),
        serde_json::Value::String(s) => Value::Text(s.clone()),
        _ => {
            return Err(CliError::InvalidKey {
                path: path.to_path_buf(),
                line,
            })
        }
    };
    Ok(document
        .fields
        .iter()
        .fold(Indexable::new(key), |indexable, (name, value)| {
            indexable.field(name.as_str(), json_to_value(value))
        }))
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates an in-memory index from the blueprint and ingests every
/// document, stopping at the first failure.
pub fn load(blueprint_path: &Path, documents_path: &Path) -> Result<Loaded, CliError> {
    let blueprint = parse_blueprint(blueprint_path, &read(blueprint_path)?)?;
    let contents = read(documents_path)?;

    let driver = Arc::new(MemoryDriver::new());
    let blixt = Blixt::with_config(driver.clone(), Config::default())?;
    let index = blixt.create(&blueprint)?;

    let mut documents = 0;
    for (number, line) in contents.lines().enumerate() {
        let line_number = number + 1;
        if line.trim().is_empty() {
            continue;
        }
        let indexable = parse_document(documents_path, line_number, line)?;
        index.add(&indexable).map_err(|source| CliError::Ingest {
            path: documents_path.to_path_buf(),
            line: line_number,
            source,
        })?;
        documents += 1;
    }
    tracing::info!(
        schema = blueprint.name(),
        documents,
        "documents loaded"
    );

    Ok(Loaded {
        driver,
        index,
        documents,
    })
}
