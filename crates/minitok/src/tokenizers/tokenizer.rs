//! # Tokenizer Trait

use crate::analysis::TokenizerStats;
use crate::errors::TokenizerError;
use crate::types::TokenType;
use crate::vocab::Vocabulary;

/// The common `encode` / `decode` capability.
pub trait Tokenizer<T: TokenType>: Send + Sync {
    /// The vocabulary this tokenizer maps through.
    fn vocab(&self) -> &Vocabulary<T>;

    /// Encode text, appending the resulting tokens to the given token buffer.
    ///
    /// Total: unknown input maps to `<UNK>`.
    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    );

    /// Decode tokens into text.
    ///
    /// # Errors
    /// [`TokenizerError::OutOfRange`] if any id is not in the vocabulary.
    fn decode(
        &self,
        tokens: &[T],
    ) -> Result<String, TokenizerError>;

    /// Encode text into tokens.
    fn encode<S: AsRef<str>>(
        &self,
        text: S,
    ) -> Vec<T> {
        let text = text.as_ref();
        let capacity = text.len() as f64 / (crate::CHARS_PER_TOKEN_HINT * 0.5);
        let mut tokens = Vec::with_capacity(capacity as usize);

        self.encode_append(text, &mut tokens);
        tokens
    }

    /// Encode a batch of text into tokens.
    fn encode_batch<S: AsRef<str>>(
        &self,
        batch: &[S],
    ) -> Vec<Vec<T>> {
        batch.iter().map(|s| self.encode(s)).collect()
    }

    /// Decode a batch of token sequences.
    fn decode_batch<V: AsRef<[T]>>(
        &self,
        batch: &[V],
    ) -> Result<Vec<String>, TokenizerError> {
        batch.iter().map(|tokens| self.decode(tokens.as_ref())).collect()
    }

    /// The vocabulary size.
    fn vocab_size(&self) -> usize {
        self.vocab().size()
    }

    /// Exact token lookup; `<UNK>` if absent.
    fn token_to_id(
        &self,
        token: &str,
    ) -> T {
        self.vocab().id_for(token)
    }

    /// The surface string of an id.
    fn id_to_token(
        &self,
        id: T,
    ) -> Result<&str, TokenizerError> {
        self.vocab().token_for(id)
    }

    /// Summary statistics.
    fn stats(&self) -> TokenizerStats {
        TokenizerStats::of_vocab(self.vocab())
    }
}
