//! Tokenize-stem-group pipeline shared by ingestion and lookup.

use super::{DefaultTokenizer, IdentityStemmer, Stemmer, Tokenizer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The tokens of one text that stem to the same word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordGroup {
    /// The stemmed word.
    pub word: String,
    /// Positions of the grouped tokens, ascending.
    pub positions: Vec<u32>,
}

impl WordGroup {
    /// Returns the number of tokens in the group.
    #[must_use]
    pub fn frequency(&self) -> u64 {
        u64::try_from(self.positions.len()).unwrap_or(u64::MAX)
    }
}

/// Pairs a tokenizer with a stemmer.
#[derive(Clone)]
pub struct Analyzer {
    tokenizer: Arc<dyn Tokenizer>,
    stemmer: Arc<dyn Stemmer>,
}

impl Analyzer {
    /// Creates an analyzer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>, stemmer: Arc<dyn Stemmer>) -> Self {
        Self { tokenizer, stemmer }
    }

    /// Returns the tokenizer.
    #[must_use]
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Returns the stemmer.
    #[must_use]
    pub fn stemmer(&self) -> &dyn Stemmer {
        self.stemmer.as_ref()
    }

    /// Tokenizes and stems the text, grouping tokens by stemmed word.
    ///
    /// Groups come in order of each word's first occurrence. Tokens that
    /// stem to an empty string are dropped.
    #[must_use]
    pub fn analyze(&self, text: &str) -> Vec<WordGroup> {
        let mut groups: Vec<WordGroup> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for token in self.tokenizer.tokenize(text) {
            let word = self.stemmer.stem(&token.text);
            if word.is_empty() {
                continue;
            }
            match slots.get(&word) {
                Some(&slot) => groups[slot].positions.push(token.position),
                None => {
                    slots.insert(word.clone(), groups.len());
                    groups.push(WordGroup {
                        word,
                        positions: vec![token.position],
                    });
                }
            }
        }

        for group in &mut groups {
            group.positions.sort_unstable();
        }
        groups
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Arc::new(DefaultTokenizer::default()), Arc::new(IdentityStemmer))
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_in_first_occurrence_order() {
        let groups = Analyzer::default().analyze("bloggs joe Bloggs");
        assert_eq!(
            groups,
            vec![
                WordGroup {
                    word: "bloggs".into(),
                    positions: vec![0, 2],
                },
                WordGroup {
                    word: "joe".into(),
                    positions: vec![1],
                },
            ]
        );
        assert_eq!(groups[0].frequency(), 2);
    }

    #[test]
    fn stemming_merges_groups() {
        let stemmer = |text: &str| text.trim_end_matches('s').to_string();
        let analyzer = Analyzer::new(Arc::new(DefaultTokenizer::default()), Arc::new(stemmer));
        let groups = analyzer.analyze("cat cats");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].word, "cat");
        assert_eq!(groups[0].positions, vec![0, 1]);
    }

    #[test]
    fn empty_stems_are_dropped() {
        let stemmer = |text: &str| if text == "the" { String::new() } else { text.to_string() };
        let analyzer = Analyzer::new(Arc::new(DefaultTokenizer::default()), Arc::new(stemmer));
        let words: Vec<_> = analyzer
            .analyze("the joe")
            .into_iter()
            .map(|g| g.word)
            .collect();
        assert_eq!(words, vec!["joe"]);
    }
}
