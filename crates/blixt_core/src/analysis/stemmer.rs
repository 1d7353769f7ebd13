//! Stemmer capability.

/// Maps token text to its normalized stem.
///
/// Implementations must be pure: the same input always yields the same
/// stem.
pub trait Stemmer: Send + Sync {
    /// Returns the stem of a token.
    fn stem(&self, text: &str) -> String;
}

/// A stemmer that keeps token text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, text: &str) -> String {
        text.to_string()
    }
}

impl<F> Stemmer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn stem(&self, text: &str) -> String {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_keeps_text() {
        assert_eq!(IdentityStemmer.stem("bloggs"), "bloggs");
    }

    #[test]
    fn closures_are_stemmers() {
        let strip_plural = |text: &str| text.trim_end_matches('s').to_string();
        assert_eq!(strip_plural.stem("bloggs"), "blogg");
    }
}
