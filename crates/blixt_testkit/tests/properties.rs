//! Property tests of the ingestion invariants.

use blixt_storage::Table;
use blixt_testkit::prelude::*;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn words_are_unique(documents in people_strategy(12)) {
        let test = TestIndex::people();
        test.add_all(&documents).unwrap();

        let words = test.words();
        let unique: BTreeSet<_> = words.iter().collect();
        prop_assert_eq!(unique.len(), words.len());
    }

    #[test]
    fn field_count_is_number_of_fields_containing_word(documents in people_strategy(12)) {
        let test = TestIndex::people();
        test.add_all(&documents).unwrap();

        let mut expected: BTreeMap<String, u64> = BTreeMap::new();
        for document in &documents {
            let text = document.get("name").and_then(|v| v.as_str()).unwrap_or_default();
            let distinct: BTreeSet<String> = text
                .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
                .filter(|w| !w.is_empty())
                .map(str::to_lowercase)
                .collect();
            for word in distinct {
                *expected.entry(word).or_default() += 1;
            }
        }

        for (word, count) in &expected {
            prop_assert_eq!(test.field_count(word), Some(*count));
        }
        prop_assert_eq!(test.count(Table::Terms), expected.len());
    }

    #[test]
    fn frequency_matches_positions(documents in people_strategy(8)) {
        let test = TestIndex::people();
        test.add_all(&documents).unwrap();

        let mut positions: BTreeMap<u64, u64> = BTreeMap::new();
        for row in test.driver.rows(Table::Positions) {
            *positions.entry(row.unsigned("occurrence_id").unwrap()).or_default() += 1;
        }
        for occurrence in test.driver.rows(Table::Occurrences) {
            let frequency = occurrence.unsigned("frequency").unwrap();
            prop_assert!(frequency > 0);
            prop_assert_eq!(positions.get(&occurrence.id).copied(), Some(frequency));
        }
    }

    #[test]
    fn rejected_duplicate_changes_nothing(documents in people_strategy(6)) {
        let test = TestIndex::people();
        test.add_all(&documents).unwrap();
        let before = test.snapshot();

        let duplicate = documents[0].clone().field("name", "fresh words only");
        prop_assert!(test.add(&duplicate).is_err());
        prop_assert_eq!(test.snapshot(), before);
    }
}
