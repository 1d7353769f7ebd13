//! Text analysis capabilities consumed by the indexer.
//!
//! A [`Tokenizer`] splits raw field text into ordered tokens, and a
//! [`Stemmer`] maps each token's text to the normalized word it is stored
//! under. Both must be deterministic; the indexer relies on the same input
//! always producing the same words so that vocabulary is deduplicated.

mod analyzer;
mod stemmer;
mod tokenizer;

pub use analyzer::{Analyzer, WordGroup};
pub use stemmer::{IdentityStemmer, Stemmer};
pub use tokenizer::{DefaultTokenizer, Token, Tokenizer, TokenizerConfig, MAX_TOKENS};
