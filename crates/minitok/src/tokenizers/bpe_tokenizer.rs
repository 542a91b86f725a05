//! # BPE Tokenizer
//!
//! Words are whitespace-delimited and prefixed with [`crate::WORD_BOUNDARY_MARKER`];
//! each word starts as a sequence of single-character symbols which are then
//! rewritten by the learned [`MergeRules`].

use crate::analysis::TokenizerStats;
use crate::errors::TokenizerError;
use crate::segmentation::TextSegmentor;
use crate::tokenizers::state::{self, TokenizerState};
use crate::tokenizers::tokenizer::Tokenizer;
use crate::training::BpeTrainerOptions;
use crate::types::TokenType;
use crate::vocab::{MergeRules, Vocabulary};
use alloc::sync::Arc;
use compact_str::CompactString;
use std::path::Path;

/// Byte-pair-encoding [`Tokenizer`].
#[derive(Clone, Debug)]
pub struct BpeTokenizer<T: TokenType> {
    vocab: Arc<Vocabulary<T>>,
    merges: Arc<MergeRules<T>>,
    target_vocab_size: usize,
    segmentor: TextSegmentor,
}

impl<T: TokenType> BpeTokenizer<T> {
    /// Assemble a tokenizer from a vocabulary and its merge rules.
    ///
    /// Every merge's symbols must be ids of `vocab`.
    pub fn from_parts(
        vocab: Arc<Vocabulary<T>>,
        merges: Arc<MergeRules<T>>,
        target_vocab_size: usize,
    ) -> Self {
        Self {
            vocab,
            merges,
            target_vocab_size,
            segmentor: TextSegmentor::whitespace(),
        }
    }

    /// Learn a tokenizer from `corpus`, using the default trainer options.
    ///
    /// See [`BpeTrainerOptions`] for the training procedure.
    ///
    /// # Errors
    /// * [`TokenizerError::EmptyCorpus`] if the corpus holds no words.
    /// * [`TokenizerError::VocabSizeTooSmall`] if `target_vocab_size` cannot hold
    ///   the special tokens plus the corpus alphabet.
    pub fn train<S>(
        corpus: &[S],
        target_vocab_size: usize,
    ) -> Result<Self, TokenizerError>
    where
        S: AsRef<str> + Sync,
    {
        let mut trainer = BpeTrainerOptions::new(target_vocab_size).init::<CompactString, u32>()?;
        trainer.update_from_samples(corpus);
        trainer.train()
    }

    /// The shared vocabulary handle.
    pub fn shared_vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    /// The learned merge rules.
    pub fn merges(&self) -> &MergeRules<T> {
        &self.merges
    }

    /// The learned merges as `(left, right)` surface strings, in rank order.
    pub fn merge_pairs(&self) -> Result<Vec<(String, String)>, TokenizerError> {
        self.merges.to_symbol_pairs(&self.vocab)
    }

    /// The vocabulary size training aimed for.
    pub fn target_vocab_size(&self) -> usize {
        self.target_vocab_size
    }

    /// Encode one word (without the boundary marker), appending to `tokens`.
    pub fn encode_append_word(
        &self,
        word: &str,
        tokens: &mut Vec<T>,
    ) {
        let start = tokens.len();

        let mut buf = [0u8; 4];
        tokens.push(self.vocab.id_for(crate::WORD_BOUNDARY_MARKER.encode_utf8(&mut buf)));
        tokens.extend(word.chars().map(|c| self.vocab.id_for(c.encode_utf8(&mut buf))));

        let mut symbols = tokens.split_off(start);
        self.merges.apply(&mut symbols);
        tokens.append(&mut symbols);
    }

    /// Export the persistent state.
    pub fn to_state(&self) -> Result<TokenizerState, TokenizerError> {
        Ok(TokenizerState::Bpe {
            vocab: self.vocab.to_token_map(),
            merges: self.merge_pairs()?,
            target_vocab_size: self.target_vocab_size,
        })
    }

    /// Rebuild from persistent state.
    ///
    /// Validates the vocabulary and that every merge's symbols, and its
    /// result, are in the vocabulary.
    pub fn from_state(state: TokenizerState) -> Result<Self, TokenizerError> {
        match state {
            TokenizerState::Bpe {
                vocab,
                merges,
                target_vocab_size,
            } => {
                let vocab = Vocabulary::from_token_map(vocab)?;
                let merges = MergeRules::from_symbol_pairs(&vocab, merges)?;
                Ok(Self::from_parts(
                    Arc::new(vocab),
                    Arc::new(merges),
                    target_vocab_size,
                ))
            }
            other => Err(TokenizerError::KindMismatch {
                expected: "bpe",
                found: other.kind(),
            }),
        }
    }

    /// Save as JSON.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> anyhow::Result<()> {
        state::save_state(path, &self.to_state()?)
    }

    /// Load from JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::from_state(state::load_state(path)?)?)
    }
}

impl<T: TokenType> Tokenizer<T> for BpeTokenizer<T> {
    fn vocab(&self) -> &Vocabulary<T> {
        &self.vocab
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, tokens)))]
    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) {
        for word in self.segmentor.split_spans(text) {
            self.encode_append_word(word, tokens);
        }
    }

    fn decode(
        &self,
        tokens: &[T],
    ) -> Result<String, TokenizerError> {
        let mut text = String::new();
        for &id in tokens {
            let token = self.vocab.token_for(id)?;
            if !self.vocab.is_special(id) {
                text.push_str(token);
            }
        }

        let text = text.replace(crate::WORD_BOUNDARY_MARKER, " ");
        Ok(match text.strip_prefix(' ') {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }

    fn stats(&self) -> TokenizerStats {
        TokenizerStats {
            merges_count: Some(self.merges.len()),
            target_vocab_size: Some(self.target_vocab_size),
            ..TokenizerStats::of_vocab(self.vocab())
        }
    }
}
