//! # Character Tokenizer

use crate::errors::TokenizerError;
use crate::tokenizers::state::{self, TokenizerState};
use crate::tokenizers::tokenizer::Tokenizer;
use crate::types::TokenType;
use crate::vocab::Vocabulary;
use ahash::AHashSet;
use alloc::sync::Arc;
use std::path::Path;

/// One token per character.
#[derive(Clone, Debug)]
pub struct CharTokenizer<T: TokenType> {
    vocab: Arc<Vocabulary<T>>,
}

impl<T: TokenType> CharTokenizer<T> {
    /// Build a tokenizer over a shared vocabulary of single characters.
    pub fn new(vocab: Arc<Vocabulary<T>>) -> Self {
        Self { vocab }
    }

    /// The special tokens followed by printable ASCII (`' '..='~'`).
    pub fn printable_ascii() -> Result<Self, TokenizerError> {
        let chars = (b' '..=b'~').map(|b| char::from(b).to_string());
        Ok(Self::new(Arc::new(Vocabulary::with_words(chars)?)))
    }

    /// The special tokens followed by the distinct characters of `text`,
    /// in first-appearance order.
    pub fn from_corpus(text: &str) -> Result<Self, TokenizerError> {
        let mut seen = AHashSet::new();
        let chars = text
            .chars()
            .filter(|c| seen.insert(*c))
            .map(String::from);
        Ok(Self::new(Arc::new(Vocabulary::with_words(chars)?)))
    }

    /// The shared vocabulary handle.
    pub fn shared_vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    /// Export the persistent state.
    pub fn to_state(&self) -> TokenizerState {
        TokenizerState::Char {
            vocab: self.vocab.to_token_map(),
        }
    }

    /// Rebuild from persistent state.
    pub fn from_state(state: TokenizerState) -> Result<Self, TokenizerError> {
        match state {
            TokenizerState::Char { vocab } => {
                Ok(Self::new(Arc::new(Vocabulary::from_token_map(vocab)?)))
            }
            other => Err(TokenizerError::KindMismatch {
                expected: "char",
                found: other.kind(),
            }),
        }
    }

    /// Save as JSON.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> anyhow::Result<()> {
        state::save_state(path, &self.to_state())
    }

    /// Load from JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::from_state(state::load_state(path)?)?)
    }
}

impl<T: TokenType> Tokenizer<T> for CharTokenizer<T> {
    fn vocab(&self) -> &Vocabulary<T> {
        &self.vocab
    }

    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) {
        let mut buf = [0u8; 4];
        tokens.extend(text.chars().map(|c| self.vocab.id_for(c.encode_utf8(&mut buf))));
    }

    fn decode(
        &self,
        tokens: &[T],
    ) -> Result<String, TokenizerError> {
        let mut text = String::with_capacity(tokens.len());
        for &id in tokens {
            let token = self.vocab.token_for(id)?;
            if !self.vocab.is_special(id) {
                text.push_str(token);
            }
        }
        Ok(text)
    }
}
