//! Index configuration.

use crate::analysis::TokenizerConfig;

/// Configuration for opening a Blixt store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether to create the store if it doesn't exist.
    pub create_if_missing: bool,

    /// Configuration of the default tokenizer.
    pub tokenizer: TokenizerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create the store if missing.
    #[must_use]
    pub fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets the tokenizer configuration.
    #[must_use]
    pub fn tokenizer(mut self, tokenizer: TokenizerConfig) -> Self {
        self.tokenizer = tokenizer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.create_if_missing);
        assert_eq!(config.tokenizer.min_token_length, 1);
        assert_eq!(config.tokenizer.max_token_length, 256);
        assert!(config.tokenizer.case_insensitive);
    }

    #[test]
    fn builder() {
        let config = Config::new()
            .create_if_missing(false)
            .tokenizer(TokenizerConfig::new().min_length(3));
        assert!(!config.create_if_missing);
        assert_eq!(config.tokenizer.min_token_length, 3);
    }
}
