//! Property-based test generators using proptest.
//!
//! Provides strategies for generating documents whose text is drawn from
//! a small vocabulary, so that words repeat within and across documents.

use blixt_core::Indexable;
use proptest::prelude::*;

/// A small vocabulary; generated text only uses these words.
pub const VOCABULARY: &[&str] = &[
    "joe", "jane", "bloggs", "doe", "smith", "anna", "lee", "park", "kim", "ole",
];

/// Strategy for one vocabulary word, in random case.
pub fn word_strategy() -> impl Strategy<Value = String> {
    (prop::sample::select(VOCABULARY), any::<bool>()).prop_map(|(word, upper)| {
        if upper {
            word.to_uppercase()
        } else {
            word.to_string()
        }
    })
}

const SEPARATORS: &[&str] = &[" ", "  ", ", ", "-", ". "];

/// Strategy for a separator between words.
pub fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SEPARATORS)
}

/// Strategy for text of `0..max_words` vocabulary words.
pub fn text_strategy(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec((word_strategy(), separator_strategy()), 0..max_words).prop_map(
        |pairs| {
            pairs
                .into_iter()
                .map(|(word, separator)| format!("{word}{separator}"))
                .collect()
        },
    )
}

/// Strategy for `people` documents with keys `0..n`.
pub fn people_strategy(max_documents: usize) -> impl Strategy<Value = Vec<Indexable>> {
    prop::collection::vec((text_strategy(6), 0..120i64), 1..max_documents).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(key, (name, age))| {
                let key = i64::try_from(key).unwrap_or(i64::MAX);
                Indexable::new(key).field("name", name).field("age", age)
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn generated_text_uses_vocabulary() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let text = text_strategy(8).new_tree(&mut runner).unwrap().current();
            for word in text.split(|c: char| !c.is_alphabetic()).filter(|w| !w.is_empty()) {
                assert!(VOCABULARY.contains(&word.to_lowercase().as_str()));
            }
        }
    }

    #[test]
    fn generated_keys_are_unique() {
        let mut runner = TestRunner::default();
        let documents = people_strategy(10).new_tree(&mut runner).unwrap().current();
        let keys: Vec<_> = documents.iter().map(|d| d.key().clone()).collect();
        let mut unique = keys.clone();
        unique.dedup();
        assert_eq!(keys, unique);
    }
}
