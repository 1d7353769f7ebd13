//! Stats command implementation.

use super::load::{load, Loaded};
use super::CliError;
use blixt_storage::Table;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Table statistics after ingestion.
#[derive(Debug, Serialize)]
pub struct StatsResult {
    /// Schema name.
    pub schema: String,
    /// Number of documents ingested.
    pub documents: usize,
    /// Row count per table.
    pub tables: BTreeMap<String, usize>,
}

impl StatsResult {
    /// Collects the statistics of a loaded index.
    pub fn collect(loaded: &Loaded) -> Self {
        Self {
            schema: loaded.index.schema().name().to_string(),
            documents: loaded.documents,
            tables: Table::ALL
                .iter()
                .map(|table| (table.name().to_string(), loaded.driver.count(*table)))
                .collect(),
        }
    }
}

/// Runs the stats command.
pub fn run(blueprint: &Path, documents: &Path, format: &str) -> Result<(), CliError> {
    let loaded = load(blueprint, documents)?;
    let result = StatsResult::collect(&loaded);

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&result).map_err(|source| CliError::Json {
                path: documents.to_path_buf(),
                line: 0,
                source,
            })?;
            println!("{json}");
        }
        _ => print_text_output(&result),
    }
    Ok(())
}

fn print_text_output(result: &StatsResult) {
    println!("Schema: {}", result.schema);
    println!("Documents ingested: {}", result.documents);
    println!();
    for table in Table::ALL {
        let count = result.tables.get(table.name()).copied().unwrap_or_default();
        println!("  {:<12} {:>8}", table.name(), count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn counts_rows_per_table() {
        let blueprint = write(
            r#"{"name": "people", "columns": [
                {"name": "name", "indexed": true},
                {"name": "age", "stored": true}
            ]}"#,
        );
        let documents = write(r#"{"key": 1, "fields": {"name": "Joe Bloggs", "age": 30}}"#);
        let loaded = load(blueprint.path(), documents.path()).unwrap();
        let stats = StatsResult::collect(&loaded);

        assert_eq!(stats.schema, "people");
        assert_eq!(stats.documents, 1);
        let expected = [
            ("columns", 2),
            ("documents", 1),
            ("fields", 2),
            ("occurrences", 2),
            ("positions", 2),
            ("schemas", 1),
            ("terms", 2),
            ("words", 2),
        ];
        let expected: BTreeMap<String, usize> = expected
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        assert_eq!(stats.tables, expected);
    }
}
