//! # Text Segmentor

use crate::errors::TokenizerError;
use crate::util::validators;
use fancy_regex::Regex;

/// Is `span` a word span (its first character is alphanumeric)?
pub fn is_word_span(span: &str) -> bool {
    span.chars().next().is_some_and(char::is_alphanumeric)
}

/// Span Reference for [`TextSegmentor`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef<'a> {
    /// A run of alphanumeric characters.
    Word(&'a str),

    /// Anything else.
    Punctuation(&'a str),
}

impl<'a> SpanRef<'a> {
    /// Classify a span.
    pub fn classify(span: &'a str) -> Self {
        if is_word_span(span) {
            SpanRef::Word(span)
        } else {
            SpanRef::Punctuation(span)
        }
    }

    /// Get the inner string slice.
    pub fn as_str(&self) -> &'a str {
        match self {
            SpanRef::Word(s) => s,
            SpanRef::Punctuation(s) => s,
        }
    }
}

/// Regex-driven text splitter.
#[derive(Clone, Debug)]
pub struct TextSegmentor {
    pattern: String,
    regex: Regex,
}

impl TextSegmentor {
    /// Create a new segmentor for `pattern`.
    ///
    /// # Errors
    /// [`TokenizerError::InvalidPattern`] if the pattern does not compile.
    pub fn new<S: Into<String>>(pattern: S) -> Result<Self, TokenizerError> {
        let pattern = pattern.into();
        let regex = validators::try_regex(&pattern)?;
        Ok(Self { pattern, regex })
    }

    /// Segmentor for [`crate::WORD_PUNCTUATION_PATTERN`].
    pub fn word_punctuation() -> Self {
        Self::builtin(crate::WORD_PUNCTUATION_PATTERN)
    }

    /// Segmentor for [`crate::WHITESPACE_PATTERN`].
    pub fn whitespace() -> Self {
        Self::builtin(crate::WHITESPACE_PATTERN)
    }

    fn builtin(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            regex: validators::expect_regex(pattern),
        }
    }

    /// Get the regex pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Split text into spans, in order.
    pub fn split_spans<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str> {
        let mut spans = Vec::new();
        self.split_append_spans(text, &mut spans);
        spans
    }

    /// Split text into spans, appending to `spans`.
    pub fn split_append_spans<'a>(
        &self,
        text: &'a str,
        spans: &mut Vec<&'a str>,
    ) {
        // Without look-around the match loop never backtracks, so it cannot fail.
        spans.extend(
            self.regex
                .find_iter(text)
                .filter_map(Result::ok)
                .map(|m| m.as_str()),
        );
    }

    /// Split text into classified [`SpanRef`]s.
    pub fn split_classified<'a>(
        &self,
        text: &'a str,
    ) -> Vec<SpanRef<'a>> {
        self.regex
            .find_iter(text)
            .filter_map(Result::ok)
            .map(|m| SpanRef::classify(m.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{check_is_send, check_is_sync};

    #[test]
    fn test_word_punctuation() {
        let segmentor = TextSegmentor::word_punctuation();
        check_is_send(&segmentor);
        check_is_sync(&segmentor);

        assert_eq!(
            segmentor.split_spans("Hello world!"),
            vec!["Hello", "world", "!"]
        );
        assert_eq!(
            segmentor.split_spans("  it's 42...\tok  "),
            vec!["it", "'", "s", "42", ".", ".", ".", "ok"]
        );
        assert_eq!(
            segmentor.split_spans("naïve café"),
            vec!["naïve", "café"]
        );
        assert!(segmentor.split_spans("").is_empty());
        assert!(segmentor.split_spans(" \n\t ").is_empty());
    }

    #[test]
    fn test_whitespace() {
        let segmentor = TextSegmentor::whitespace();

        assert_eq!(
            segmentor.split_spans(" low  lower\nnewest "),
            vec!["low", "lower", "newest"]
        );
        assert_eq!(segmentor.pattern(), crate::WHITESPACE_PATTERN);
    }

    #[test]
    fn test_classified() {
        let segmentor = TextSegmentor::word_punctuation();
        assert_eq!(
            segmentor.split_classified("Hi, you."),
            vec![
                SpanRef::Word("Hi"),
                SpanRef::Punctuation(","),
                SpanRef::Word("you"),
                SpanRef::Punctuation("."),
            ]
        );
        assert_eq!(SpanRef::Word("Hi").as_str(), "Hi");
    }

    #[test]
    fn test_bad_pattern() {
        assert_eq!(
            TextSegmentor::new("(").err(),
            Some(TokenizerError::InvalidPattern {
                pattern: "(".to_string()
            })
        );
        assert!(TextSegmentor::new(r"\w+").is_ok());
    }

    #[test]
    fn test_is_word_span() {
        assert!(is_word_span("abc"));
        assert!(is_word_span("9"));
        assert!(!is_word_span("!"));
        assert!(!is_word_span(""));
    }
}
