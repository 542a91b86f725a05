//! # Tokenization Analysis
//!
//! Counting and compression metrics over any [`Tokenizer`].

use crate::errors::TokenizerError;
use crate::tokenizers::Tokenizer;
use crate::types::TokenType;
use crate::vocab::{NUM_SPECIAL_TOKENS, Vocabulary};

/// Summary statistics of a tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenizerStats {
    /// The vocabulary size.
    pub vocab_size: usize,

    /// The number of reserved special tokens.
    pub special_tokens: usize,

    /// The number of learned merges; BPE only.
    pub merges_count: Option<usize>,

    /// The vocabulary size training aimed for; BPE only.
    pub target_vocab_size: Option<usize>,
}

impl TokenizerStats {
    /// Stats of a plain vocabulary.
    pub fn of_vocab<T: TokenType>(vocab: &Vocabulary<T>) -> Self {
        Self {
            vocab_size: vocab.size(),
            special_tokens: NUM_SPECIAL_TOKENS,
            merges_count: None,
            target_vocab_size: None,
        }
    }
}

/// Compression metrics for one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextEfficiency {
    /// Characters (not bytes) in the text.
    pub char_count: usize,

    /// Tokens produced.
    pub token_count: usize,

    /// `char_count / token_count`; `0` when there are no tokens.
    pub chars_per_token: f64,

    /// Same as `chars_per_token`.
    pub compression_ratio: f64,

    /// `1 / chars_per_token`; `0` when there are no tokens.
    pub efficiency_score: f64,
}

/// Count the tokens `text` encodes to.
pub fn count_tokens<T, K>(
    tokenizer: &K,
    text: &str,
) -> usize
where
    T: TokenType,
    K: Tokenizer<T>,
{
    tokenizer.encode(text).len()
}

/// Compute [`TextEfficiency`] for `text`.
pub fn analyze_text_efficiency<T, K>(
    tokenizer: &K,
    text: &str,
) -> TextEfficiency
where
    T: TokenType,
    K: Tokenizer<T>,
{
    let char_count = text.chars().count();
    let token_count = count_tokens(tokenizer, text);

    let chars_per_token = if token_count > 0 {
        char_count as f64 / token_count as f64
    } else {
        0.0
    };
    let efficiency_score = if chars_per_token > 0.0 {
        1.0 / chars_per_token
    } else {
        0.0
    };

    TextEfficiency {
        char_count,
        token_count,
        chars_per_token,
        compression_ratio: chars_per_token,
        efficiency_score,
    }
}

/// Encode `text` and pair each id with its surface string.
pub fn token_breakdown<T, K>(
    tokenizer: &K,
    text: &str,
) -> Result<Vec<(T, String)>, TokenizerError>
where
    T: TokenType,
    K: Tokenizer<T>,
{
    tokenizer
        .encode(text)
        .into_iter()
        .map(|id| Ok((id, tokenizer.id_to_token(id)?.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizers::{CharTokenizer, SimpleTokenizer};

    #[test]
    fn test_count_tokens() {
        let tokenizer = SimpleTokenizer::<u32>::from_preset("simple").unwrap();

        assert_eq!(count_tokens(&tokenizer, "Hello world!"), 3);
        assert_eq!(count_tokens(&tokenizer, ""), 0);
    }

    #[test]
    fn test_efficiency() {
        let tokenizer = SimpleTokenizer::<u32>::from_preset("simple").unwrap();

        let metrics = analyze_text_efficiency(&tokenizer, "Hello world!");
        assert_eq!(metrics.char_count, 12);
        assert_eq!(metrics.token_count, 3);
        assert_eq!(metrics.chars_per_token, 4.0);
        assert_eq!(metrics.compression_ratio, 4.0);
        assert_eq!(metrics.efficiency_score, 0.25);

        let metrics = analyze_text_efficiency(&tokenizer, "   ");
        assert_eq!(metrics.char_count, 3);
        assert_eq!(metrics.token_count, 0);
        assert_eq!(metrics.chars_per_token, 0.0);
        assert_eq!(metrics.efficiency_score, 0.0);
    }

    #[test]
    fn test_efficiency_counts_chars() {
        let tokenizer = CharTokenizer::<u32>::from_corpus("\u{e9}t\u{e9}").unwrap();

        let metrics = analyze_text_efficiency(&tokenizer, "\u{e9}t\u{e9}");
        assert_eq!(metrics.char_count, 3);
        assert_eq!(metrics.token_count, 3);
        assert_eq!(metrics.chars_per_token, 1.0);
    }

    #[test]
    fn test_token_breakdown() {
        let tokenizer = SimpleTokenizer::<u32>::from_preset("simple").unwrap();

        assert_eq!(
            token_breakdown(&tokenizer, "Hello Bob!").unwrap(),
            vec![
                (6, "Hello".to_string()),
                (0, "<UNK>".to_string()),
                (8, "!".to_string()),
            ]
        );
    }
}
