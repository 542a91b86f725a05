//! # Simple Tokenizer
//!
//! Word / punctuation splitting over a fixed [`Vocabulary`].
//!
//! * Encoding: maximal alphanumeric runs are word tokens, every other
//!   non-whitespace character is a punctuation token, whitespace is dropped.
//! * Decoding: a single space before every word token but the first;
//!   punctuation attaches to the preceding token.

use crate::errors::TokenizerError;
use crate::segmentation::{TextSegmentor, is_word_span};
use crate::tokenizers::state::{self, TokenizerState};
use crate::tokenizers::tokenizer::Tokenizer;
use crate::types::TokenType;
use crate::vocab::{Vocabulary, load_sample_vocab};
use alloc::sync::Arc;
use std::path::Path;

/// Fixed-vocabulary word / punctuation [`Tokenizer`].
#[derive(Clone, Debug)]
pub struct SimpleTokenizer<T: TokenType> {
    vocab: Arc<Vocabulary<T>>,
    segmentor: TextSegmentor,
}

impl<T: TokenType> SimpleTokenizer<T> {
    /// Build a tokenizer over a shared vocabulary.
    pub fn new(vocab: Arc<Vocabulary<T>>) -> Self {
        Self {
            vocab,
            segmentor: TextSegmentor::word_punctuation(),
        }
    }

    /// Build a tokenizer over a named preset; see [`load_sample_vocab`].
    pub fn from_preset(name: &str) -> Result<Self, TokenizerError> {
        Ok(Self::new(Arc::new(load_sample_vocab(name)?)))
    }

    /// The shared vocabulary handle.
    pub fn shared_vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    /// Export the persistent state.
    pub fn to_state(&self) -> TokenizerState {
        TokenizerState::Simple {
            vocab: self.vocab.to_token_map(),
        }
    }

    /// Rebuild from persistent state.
    pub fn from_state(state: TokenizerState) -> Result<Self, TokenizerError> {
        match state {
            TokenizerState::Simple { vocab } => {
                Ok(Self::new(Arc::new(Vocabulary::from_token_map(vocab)?)))
            }
            other => Err(TokenizerError::KindMismatch {
                expected: "simple",
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

impl<T: TokenType> Tokenizer<T> for SimpleTokenizer<T> {
    fn vocab(&self) -> &Vocabulary<T> {
        &self.vocab
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, tokens)))]
    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) {
        tokens.extend(
            self.segmentor
                .split_spans(text)
                .into_iter()
                .map(|span| self.vocab.id_for(span)),
        );
    }

    fn decode(
        &self,
        tokens: &[T],
    ) -> Result<String, TokenizerError> {
        let mut text = String::new();
        for &id in tokens {
            let token = self.vocab.token_for(id)?;
            if self.vocab.is_special(id) {
                continue;
            }
            if !text.is_empty() && is_word_span(token) {
                text.push(' ');
            }
            text.push_str(token);
        }
        Ok(text)
    }
}
