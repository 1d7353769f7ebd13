//! Lookup command implementation.

use super::load::{load, value_to_json};
use super::CliError;
use blixt_core::TermPostings;
use serde::Serialize;
use std::path::Path;

/// Postings of one word.
#[derive(Debug, Serialize)]
pub struct WordResult {
    /// The stemmed word.
    pub word: String,
    /// Number of fields containing the word.
    pub field_count: u64,
    /// Fields containing the word.
    pub postings: Vec<PostingResult>,
}

/// One field containing a word.
#[derive(Debug, Serialize)]
pub struct PostingResult {
    /// Document key.
    pub document: serde_json::Value,
    /// Column name.
    pub column: String,
    /// Number of matching tokens.
    pub frequency: u64,
    /// Token positions.
    pub positions: Vec<u32>,
}

impl From<TermPostings> for WordResult {
    fn from(term: TermPostings) -> Self {
        Self {
            word: term.word,
            field_count: term.field_count,
            postings: term
                .postings
                .into_iter()
                .map(|p| PostingResult {
                    document: value_to_json(&p.document_key),
                    column: p.column,
                    frequency: p.frequency,
                    positions: p.positions,
                })
                .collect(),
        }
    }
}

/// Runs the lookup command.
pub fn run(blueprint: &Path, documents: &Path, term: &str, format: &str) -> Result<(), CliError> {
    let loaded = load(blueprint, documents)?;
    let results: Vec<WordResult> = loaded
        .index
        .lookup(term)?
        .into_iter()
        .map(WordResult::from)
        .collect();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&results).map_err(|source| CliError::Json {
                path: documents.to_path_buf(),
                line: 0,
                source,
            })?;
            println!("{json}");
        }
        _ => print_text_output(term, &results),
    }
    Ok(())
}

fn print_text_output(term: &str, results: &[WordResult]) {
    if results.is_empty() {
        println!("No postings for {term:?}");
        return;
    }
    for result in results {
        println!("{} (in {} field(s))", result.word, result.field_count);
        for posting in &result.postings {
            println!(
                "  document {} {}: frequency {}, positions {:?}",
                posting.document, posting.column, posting.frequency, posting.positions
            );
        }
    }
}
