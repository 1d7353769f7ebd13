//! Benchmark utilities.

#![warn(missing_docs)]

use blixt_core::{Blixt, Blueprint, Config, Index, Indexable};
use blixt_storage::MemoryDriver;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Generate a vocabulary of `size` distinct lowercase words.
pub fn vocabulary(size: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    let mut words: Vec<String> = (0..size)
        .map(|i| {
            let len = rng.gen_range(3..10);
            let stem: String = (0..len)
                .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
                .collect();
            format!("{stem}{i}")
        })
        .collect();
    words.shuffle(&mut rng);
    words
}

/// Generate text of `words` words drawn from the vocabulary.
pub fn random_text(vocabulary: &[String], words: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..words)
        .filter_map(|_| vocabulary.choose(&mut rng).map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate `count` article documents with bodies of `words` words.
pub fn generate_articles(count: usize, words: usize, vocabulary: &[String]) -> Vec<Indexable> {
    (0..count)
        .map(|i| {
            Indexable::new(i64::try_from(i).unwrap_or(i64::MAX))
                .field("title", random_text(vocabulary, 4))
                .field("body", random_text(vocabulary, words))
        })
        .collect()
}

/// The articles blueprint: indexed and stored title, indexed body.
pub fn articles_blueprint() -> Blueprint {
    Blueprint::new("articles")
        .define("title", true, true)
        .indexed("body")
}

/// Create an empty articles index over a fresh memory driver.
pub fn articles_index() -> (Arc<MemoryDriver>, Index) {
    let driver = Arc::new(MemoryDriver::new());
    let blixt =
        Blixt::with_config(driver.clone(), Config::default()).expect("Failed to install store");
    let index = blixt
        .create(&articles_blueprint())
        .expect("Failed to create index");
    (driver, index)
}
