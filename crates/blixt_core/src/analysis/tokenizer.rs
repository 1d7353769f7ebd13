//! Tokenizer capability and the default tokenizer.

/// Most tokens a text can yield; every position must fit in a `u32`.
pub const MAX_TOKENS: usize = u32::MAX as usize;

/// A token with its position in the tokenized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text.
    pub text: String,
    /// 0-based index of the token among the kept tokens.
    pub position: u32,
}

impl Token {
    /// Creates a token.
    pub fn new(text: impl Into<String>, position: u32) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// Splits text into ordered tokens.
///
/// Implementations must be deterministic and return finitely many tokens
/// with strictly increasing positions.
pub trait Tokenizer: Send + Sync {
    /// Tokenizes the text.
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Configuration for the default tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Minimum token length, in characters, to keep.
    pub min_token_length: usize,
    /// Maximum token length, in characters, to keep.
    pub max_token_length: usize,
    /// Whether to lowercase tokens.
    pub case_insensitive: bool,
    /// Additional characters to treat as separators.
    pub extra_separators: Vec<char>,
    /// Maximum number of tokens kept per text; the rest are dropped.
    pub max_tokens: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_token_length: 1,
            max_token_length: 256,
            case_insensitive: true,
            extra_separators: vec![],
            max_tokens: MAX_TOKENS,
        }
    }
}

impl TokenizerConfig {
    /// Creates a new tokenizer configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets minimum token length.
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_token_length = len;
        self
    }

    /// Sets maximum token length.
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_token_length = len;
        self
    }

    /// Keeps the case of tokens.
    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.case_insensitive = false;
        self
    }

    /// Sets the maximum number of tokens kept per text, capped at
    /// [`MAX_TOKENS`].
    #[must_use]
    pub fn max_tokens(mut self, count: usize) -> Self {
        self.max_tokens = count.min(MAX_TOKENS);
        self
    }

    /// Adds extra separator characters.
    #[must_use]
    pub fn with_separators(mut self, chars: &[char]) -> Self {
        self.extra_separators.extend_from_slice(chars);
        self
    }

    fn is_separator(&self, c: char) -> bool {
        c.is_whitespace() || c.is_ascii_punctuation() || self.extra_separators.contains(&c)
    }

    fn keeps(&self, token: &str) -> bool {
        let len = token.chars().count();
        len >= self.min_token_length && len <= self.max_token_length
    }
}

/// Splits on whitespace, ASCII punctuation and configured separators.
///
/// Tokens outside the configured length bounds are dropped and do not
/// take up a position.
#[derive(Debug, Clone, Default)]
pub struct DefaultTokenizer {
    config: TokenizerConfig,
}

impl DefaultTokenizer {
    /// Creates a tokenizer with the given configuration.
    #[must_use]
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }
}

impl Tokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let config = &self.config;
        let limit = config.max_tokens.min(MAX_TOKENS);
        let mut tokens = Vec::new();
        for raw in text
            .split(|c: char| config.is_separator(c))
            .filter(|raw| !raw.is_empty() && config.keeps(raw))
        {
            let position = match u32::try_from(tokens.len()) {
                Ok(position) if tokens.len() < limit => position,
                _ => {
                    tracing::debug!(limit, "token limit reached, dropping the rest of the text");
                    break;
                }
            };
            let text = if config.case_insensitive {
                raw.to_lowercase()
            } else {
                raw.to_string()
            };
            tokens.push(Token::new(text, position));
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn tokenize_basic() {
        let tokens = DefaultTokenizer::default().tokenize("Joe Bloggs");
        assert_eq!(tokens, vec![Token::new("joe", 0), Token::new("bloggs", 1)]);
    }

    #[test]
    fn tokenize_with_punctuation() {
        let tokens = DefaultTokenizer::default().tokenize("Hello, World! How are you?");
        assert_eq!(texts(&tokens), vec!["hello", "world", "how", "are", "you"]);
        let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn tokenize_case_sensitive() {
        let tokenizer = DefaultTokenizer::new(TokenizerConfig::new().case_sensitive());
        let tokens = tokenizer.tokenize("Hello World HELLO");
        assert_eq!(texts(&tokens), vec!["Hello", "World", "HELLO"]);
    }

    #[test]
    fn dropped_tokens_take_no_position() {
        let tokenizer = DefaultTokenizer::new(TokenizerConfig::new().min_length(2));
        let tokens = tokenizer.tokenize("a joe b bloggs");
        assert_eq!(tokens, vec![Token::new("joe", 0), Token::new("bloggs", 1)]);
    }

    #[test]
    fn max_length_counts_characters() {
        let tokenizer = DefaultTokenizer::new(TokenizerConfig::new().max_length(3));
        assert_eq!(texts(&tokenizer.tokenize("été long")), vec!["été"]);
    }

    #[test]
    fn extra_separators() {
        let tokenizer = DefaultTokenizer::new(TokenizerConfig::new().with_separators(&['|']));
        assert_eq!(texts(&tokenizer.tokenize("joe|bloggs")), vec!["joe", "bloggs"]);
    }

    #[test]
    fn max_tokens_truncates() {
        let tokenizer = DefaultTokenizer::new(TokenizerConfig::new().max_tokens(2));
        let tokens = tokenizer.tokenize("joe bloggs jane doe");
        assert_eq!(tokens, vec![Token::new("joe", 0), Token::new("bloggs", 1)]);
        assert!(DefaultTokenizer::new(TokenizerConfig::new().max_tokens(0))
            .tokenize("joe")
            .is_empty());
    }

    #[test]
    fn max_tokens_is_capped_by_position_range() {
        let config = TokenizerConfig::new().max_tokens(usize::MAX);
        assert_eq!(config.max_tokens, MAX_TOKENS);
        assert!(u32::try_from(MAX_TOKENS - 1).is_ok());
    }

    #[test]
    fn empty_input() {
        assert!(DefaultTokenizer::default().tokenize("  ,, ").is_empty());
    }

    proptest! {
        #[test]
        fn positions_are_consecutive(text in "\\PC{0,64}") {
            let tokens = DefaultTokenizer::default().tokenize(&text);
            for (index, token) in tokens.iter().enumerate() {
                prop_assert_eq!(token.position as usize, index);
                prop_assert!(!token.text.is_empty());
                prop_assert!(!token.text.chars().any(|c| c.is_whitespace() || c.is_ascii_punctuation()));
            }
        }
    }
}
