//! # Tokenizer Persistence
//!
//! Tokenizers persist as a JSON document tagged by kind:
//!
//! ```json
//! {
//!   "type": "bpe",
//!   "vocab": {"<UNK>": 0, "<PAD>": 1, "<BOS>": 2, "<EOS>": 3, "a": 4, "b": 5, "ab": 6},
//!   "merges": [["a", "b"]],
//!   "target_vocab_size": 1000
//! }
//! ```

use crate::analysis::TokenizerStats;
use crate::errors::TokenizerError;
use crate::tokenizers::{BpeTokenizer, CharTokenizer, SimpleTokenizer, Tokenizer};
use crate::types::TokenType;
use crate::vocab::Vocabulary;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serialized tokenizer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenizerState {
    /// A [`SimpleTokenizer`].
    Simple {
        /// `{token: id}`.
        vocab: BTreeMap<String, u64>,
    },

    /// A [`CharTokenizer`].
    Char {
        /// `{token: id}`.
        vocab: BTreeMap<String, u64>,
    },

    /// A [`BpeTokenizer`].
    Bpe {
        /// `{token: id}`.
        vocab: BTreeMap<String, u64>,

        /// `(left, right)` merges in rank order.
        merges: Vec<(String, String)>,

        /// The vocabulary size training aimed for.
        target_vocab_size: usize,
    },
}

impl TokenizerState {
    /// The `"type"` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenizerState::Simple { .. } => "simple",
            TokenizerState::Char { .. } => "char",
            TokenizerState::Bpe { .. } => "bpe",
        }
    }
}

/// Write a [`TokenizerState`] as JSON.
pub fn save_state<P: AsRef<Path>>(
    path: P,
    state: &TokenizerState,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create tokenizer file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, state)
        .with_context(|| format!("failed to write tokenizer state to {}", path.display()))?;
    writer.flush()?;

    log::debug!("Saved {} tokenizer to {}", state.kind(), path.display());
    Ok(())
}

/// Read a [`TokenizerState`] from JSON.
pub fn load_state<P: AsRef<Path>>(path: P) -> anyhow::Result<TokenizerState> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open tokenizer file {}", path.display()))?;

    let state: TokenizerState = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse tokenizer state from {}", path.display()))?;

    log::debug!("Loaded {} tokenizer from {}", state.kind(), path.display());
    Ok(state)
}

/// Any of the crate's tokenizers.
#[derive(Clone, Debug)]
pub enum AnyTokenizer<T: TokenType> {
    /// See [`SimpleTokenizer`].
    Simple(SimpleTokenizer<T>),

    /// See [`CharTokenizer`].
    Char(CharTokenizer<T>),

    /// See [`BpeTokenizer`].
    Bpe(BpeTokenizer<T>),
}

impl<T: TokenType> From<SimpleTokenizer<T>> for AnyTokenizer<T> {
    fn from(tokenizer: SimpleTokenizer<T>) -> Self {
        AnyTokenizer::Simple(tokenizer)
    }
}

impl<T: TokenType> From<CharTokenizer<T>> for AnyTokenizer<T> {
    fn from(tokenizer: CharTokenizer<T>) -> Self {
        AnyTokenizer::Char(tokenizer)
    }
}

impl<T: TokenType> From<BpeTokenizer<T>> for AnyTokenizer<T> {
    fn from(tokenizer: BpeTokenizer<T>) -> Self {
        AnyTokenizer::Bpe(tokenizer)
    }
}

impl<T: TokenType> AnyTokenizer<T> {
    /// The `"type"` tag of this tokenizer.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyTokenizer::Simple(_) => "simple",
            AnyTokenizer::Char(_) => "char",
            AnyTokenizer::Bpe(_) => "bpe",
        }
    }

    /// Export the persistent state.
    pub fn to_state(&self) -> Result<TokenizerState, TokenizerError> {
        match self {
            AnyTokenizer::Simple(t) => Ok(t.to_state()),
            AnyTokenizer::Char(t) => Ok(t.to_state()),
            AnyTokenizer::Bpe(t) => t.to_state(),
        }
    }

    /// Rebuild from persistent state, of any kind.
    pub fn from_state(state: TokenizerState) -> Result<Self, TokenizerError> {
        Ok(match state {
            s @ TokenizerState::Simple { .. } => SimpleTokenizer::from_state(s)?.into(),
            s @ TokenizerState::Char { .. } => CharTokenizer::from_state(s)?.into(),
            s @ TokenizerState::Bpe { .. } => BpeTokenizer::from_state(s)?.into(),
        })
    }

    /// Save as JSON.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> anyhow::Result<()> {
        save_state(path, &self.to_state()?)
    }

    /// Load from JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self::from_state(load_state(path)?)?)
    }
}

impl<T: TokenType> Tokenizer<T> for AnyTokenizer<T> {
    fn vocab(&self) -> &Vocabulary<T> {
        match self {
            AnyTokenizer::Simple(t) => t.vocab(),
            AnyTokenizer::Char(t) => t.vocab(),
            AnyTokenizer::Bpe(t) => t.vocab(),
        }
    }

    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) {
        match self {
            AnyTokenizer::Simple(t) => t.encode_append(text, tokens),
            AnyTokenizer::Char(t) => t.encode_append(text, tokens),
            AnyTokenizer::Bpe(t) => t.encode_append(text, tokens),
        }
    }

    fn decode(
        &self,
        tokens: &[T],
    ) -> Result<String, TokenizerError> {
        match self {
            AnyTokenizer::Simple(t) => t.decode(tokens),
            AnyTokenizer::Char(t) => t.decode(tokens),
            AnyTokenizer::Bpe(t) => t.decode(tokens),
        }
    }

    fn stats(&self) -> TokenizerStats {
        match self {
            AnyTokenizer::Simple(t) => t.stats(),
            AnyTokenizer::Char(t) => t.stats(),
            AnyTokenizer::Bpe(t) => t.stats(),
        }
    }
}

/// Save any tokenizer as JSON.
pub fn save_tokenizer<T: TokenType, P: AsRef<Path>>(
    path: P,
    tokenizer: &AnyTokenizer<T>,
) -> anyhow::Result<()> {
    tokenizer.save(path)
}

/// Load any tokenizer from JSON; the kind is read from the `"type"` tag.
pub fn load_tokenizer<T: TokenType, P: AsRef<Path>>(path: P) -> anyhow::Result<AnyTokenizer<T>> {
    AnyTokenizer::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::load_sample_vocab;
    use alloc::sync::Arc;

    #[test]
    fn test_state_json_layout() {
        let state = TokenizerState::Bpe {
            vocab: Vocabulary::<u32>::with_words(["\u{2581}", "a", "b", "ab"])
                .unwrap()
                .to_token_map(),
            merges: vec![("a".to_string(), "b".to_string())],
            target_vocab_size: 1000,
        };

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["type"], "bpe");
        assert_eq!(value["vocab"]["ab"], 7);
        assert_eq!(value["merges"][0][0], "a");
        assert_eq!(value["merges"][0][1], "b");
        assert_eq!(value["target_vocab_size"], 1000);

        let parsed: TokenizerState = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, state);

        let tokenizer = AnyTokenizer::<u32>::from_state(parsed).unwrap();
        assert_eq!(tokenizer.kind(), "bpe");
        assert_eq!(tokenizer.encode("ab ba"), vec![4, 7, 4, 6, 5]);
        assert_eq!(tokenizer.decode(&[4, 7, 4, 6, 5]).unwrap(), "ab ba");
    }

    #[test]
    fn test_simple_json() {
        let json = r#"{"type": "simple", "vocab": {"<UNK>": 0, "<PAD>": 1, "<BOS>": 2, "<EOS>": 3, "hi": 4}}"#;
        let state: TokenizerState = serde_json::from_str(json).unwrap();
        assert_eq!(state.kind(), "simple");

        let tokenizer = AnyTokenizer::<u16>::from_state(state).unwrap();
        assert_eq!(tokenizer.encode("hi there"), vec![4, 0]);
    }

    #[test]
    fn test_invalid_merge_state() {
        let state = TokenizerState::Bpe {
            vocab: Vocabulary::<u32>::with_words(["a", "b"])
                .unwrap()
                .to_token_map(),
            merges: vec![("a".to_string(), "b".to_string())],
            target_vocab_size: 10,
        };
        assert_eq!(
            AnyTokenizer::<u32>::from_state(state).err(),
            Some(TokenizerError::UnknownMergeSymbol {
                symbol: "ab".to_string()
            })
        );
    }

    #[test]
    fn test_save_load_any() {
        let simple = AnyTokenizer::from(SimpleTokenizer::<u32>::from_preset("simple").unwrap());
        let chars = AnyTokenizer::from(CharTokenizer::<u32>::printable_ascii().unwrap());
        let bpe = AnyTokenizer::from(BpeTokenizer::<u32>::train(&["aaab aab ab"], 100).unwrap());

        tempdir::TempDir::new("any_tokenizer")
            .and_then(|dir| {
                for tokenizer in [simple, chars, bpe] {
                    let path = dir.path().join(format!("{}.json", tokenizer.kind()));
                    save_tokenizer(&path, &tokenizer).expect("Failed to save tokenizer");

                    let loaded: AnyTokenizer<u32> =
                        load_tokenizer(&path).expect("Failed to load tokenizer");
                    assert_eq!(loaded.kind(), tokenizer.kind());
                    assert_eq!(loaded.vocab(), tokenizer.vocab());
                    assert_eq!(loaded.stats(), tokenizer.stats());
                    assert_eq!(loaded.encode("ab Hello!"), tokenizer.encode("ab Hello!"));
                }
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_typed_load_wrong_kind() {
        let vocab = load_sample_vocab::<u32>("simple").unwrap();
        let simple = SimpleTokenizer::new(Arc::new(vocab));

        tempdir::TempDir::new("wrong_kind")
            .and_then(|dir| {
                let path = dir.path().join("simple.json");
                simple.save(&path).expect("Failed to save tokenizer");

                let err = BpeTokenizer::<u32>::load(&path).unwrap_err();
                assert_eq!(
                    err.downcast_ref::<TokenizerError>(),
                    Some(&TokenizerError::KindMismatch {
                        expected: "bpe",
                        found: "simple",
                    })
                );
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_tokenizer::<u32, _>("/nonexistent/tokenizer.json").unwrap_err();
        assert!(err.to_string().contains("failed to open tokenizer file"));
    }
}
