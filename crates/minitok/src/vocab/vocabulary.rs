//! # Vocabulary
//!
//! A bidirectional `token <-> id` mapping.
//!
//! Ids are contiguous from `0`, and the [`SpecialToken`]s occupy the first
//! [`NUM_SPECIAL_TOKENS`] ids.

use crate::errors::TokenizerError;
use crate::types::TokenType;
use crate::util::validators;
use crate::vocab::special_tokens::{NUM_SPECIAL_TOKENS, SpecialToken};
use ahash::AHashMap;
use compact_str::CompactString;
use std::collections::BTreeMap;

/// Token vocabulary; immutable once shared.
#[derive(Debug, Clone)]
pub struct Vocabulary<T: TokenType> {
    /// `tokens[id]` is the surface string of `id`.
    tokens: Vec<CompactString>,

    /// Reverse index of `tokens`.
    index: AHashMap<CompactString, T>,

    /// Ids of the special tokens, in [`SpecialToken::ALL`] order.
    specials: [T; NUM_SPECIAL_TOKENS],
}

impl<T: TokenType> PartialEq for Vocabulary<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.tokens == other.tokens
    }
}

impl<T: TokenType> Eq for Vocabulary<T> {}

impl<T: TokenType> Vocabulary<T> {
    /// Build a vocabulary holding only the special tokens.
    pub fn specials_only() -> Result<Self, TokenizerError> {
        Self::from_tokens(SpecialToken::ALL.map(SpecialToken::as_str))
    }

    /// Build a vocabulary from the special tokens followed by `words`.
    ///
    /// `words[i]` receives id `NUM_SPECIAL_TOKENS + i`.
    pub fn with_words<I, S>(words: I) -> Result<Self, TokenizerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::specials_only()?;
        for word in words {
            vocab.push(word.as_ref())?;
        }
        Ok(vocab)
    }

    /// Build a vocabulary from tokens in id order.
    ///
    /// The first [`NUM_SPECIAL_TOKENS`] entries must be the special tokens in
    /// [`SpecialToken::ALL`] order.
    ///
    /// # Errors
    /// * [`TokenizerError::MisplacedSpecialToken`] if the specials are not at their ids.
    /// * [`TokenizerError::DuplicateToken`] if a token appears twice.
    /// * [`TokenizerError::TokenOverflow`] if the ids do not fit in `T`.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, TokenizerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<CompactString> = tokens
            .into_iter()
            .map(|t| CompactString::from(t.as_ref()))
            .collect();
        validators::try_token_capacity::<T>(tokens.len())?;

        let mut specials = [T::zero(); NUM_SPECIAL_TOKENS];
        for special in SpecialToken::ALL {
            if tokens.get(special.id()).map(CompactString::as_str) != Some(special.as_str()) {
                return Err(TokenizerError::MisplacedSpecialToken {
                    token: special.as_str(),
                    id: special.id(),
                });
            }
            specials[special.id()] = to_token(special.id())?;
        }

        let mut index = AHashMap::with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            if index.insert(token.clone(), to_token(idx)?).is_some() {
                return Err(TokenizerError::DuplicateToken {
                    token: token.to_string(),
                    id: idx as u64,
                });
            }
        }

        Ok(Self {
            tokens,
            index,
            specials,
        })
    }

    /// Build a vocabulary from `(token, id)` entries in any order.
    ///
    /// # Errors
    /// * [`TokenizerError::NonContiguousIds`] if the ids are not exactly `0..n`.
    /// * any error of [`Vocabulary::from_tokens`].
    pub fn from_token_map<I, S>(entries: I) -> Result<Self, TokenizerError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut entries: Vec<(u64, S)> = entries.into_iter().map(|(s, id)| (id, s)).collect();
        entries.sort_by_key(|(id, _)| *id);

        for (expected, (found, _)) in entries.iter().enumerate() {
            let expected = expected as u64;
            if *found != expected {
                return Err(TokenizerError::NonContiguousIds {
                    expected,
                    found: *found,
                });
            }
        }

        Self::from_tokens(entries.into_iter().map(|(_, s)| s))
    }

    /// Append a new token, returning its id.
    ///
    /// Only used while a vocabulary is being built or trained.
    pub(crate) fn push(
        &mut self,
        token: &str,
    ) -> Result<T, TokenizerError> {
        let idx = self.tokens.len();
        if self.index.contains_key(token) {
            return Err(TokenizerError::DuplicateToken {
                token: token.to_string(),
                id: idx as u64,
            });
        }
        validators::try_token_capacity::<T>(idx + 1)?;
        let id = to_token(idx)?;

        let token = CompactString::from(token);
        self.index.insert(token.clone(), id);
        self.tokens.push(token);
        Ok(id)
    }

    /// The number of entries.
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    /// Exact lookup; the `<UNK>` id if `token` is absent.
    pub fn id_for(
        &self,
        token: &str,
    ) -> T {
        self.get_id(token).unwrap_or_else(|| self.unk_id())
    }

    /// Exact lookup.
    pub fn get_id(
        &self,
        token: &str,
    ) -> Option<T> {
        self.index.get(token).copied()
    }

    /// The surface string of `id`.
    ///
    /// # Errors
    /// [`TokenizerError::OutOfRange`] if `id >= size()`.
    pub fn token_for(
        &self,
        id: T,
    ) -> Result<&str, TokenizerError> {
        id.to_usize()
            .and_then(|idx| self.tokens.get(idx))
            .map(CompactString::as_str)
            .ok_or_else(|| TokenizerError::out_of_range(id, self.size()))
    }

    /// Is `token` in the vocabulary?
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.index.contains_key(token)
    }

    /// Is `id` one of the reserved special ids?
    pub fn is_special(
        &self,
        id: T,
    ) -> bool {
        id.to_usize().is_some_and(|idx| idx < NUM_SPECIAL_TOKENS)
    }

    /// The id of a special token.
    pub fn special_id(
        &self,
        special: SpecialToken,
    ) -> T {
        self.specials[special.id()]
    }

    /// The `<UNK>` id.
    pub fn unk_id(&self) -> T {
        self.special_id(SpecialToken::Unk)
    }

    /// The `<PAD>` id.
    pub fn pad_id(&self) -> T {
        self.special_id(SpecialToken::Pad)
    }

    /// The `<BOS>` id.
    pub fn bos_id(&self) -> T {
        self.special_id(SpecialToken::Bos)
    }

    /// The `<EOS>` id.
    pub fn eos_id(&self) -> T {
        self.special_id(SpecialToken::Eos)
    }

    /// Iterate over the tokens in id order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(CompactString::as_str)
    }

    /// Iterate over `(id, token)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &str)> {
        self.tokens
            .iter()
            .map(|token| (self.index[token], token.as_str()))
    }

    /// Export as a `{token: id}` map.
    pub fn to_token_map(&self) -> BTreeMap<String, u64> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| (token.to_string(), idx as u64))
            .collect()
    }

    /// Reduce the capacity of the internal storage to fit its contents.
    pub fn shrink_to_fit(&mut self) {
        self.tokens.shrink_to_fit();
        self.index.shrink_to_fit();
    }
}

fn to_token<T: TokenType>(idx: usize) -> Result<T, TokenizerError> {
    T::from_usize(idx).ok_or(TokenizerError::TokenOverflow { size: idx + 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{check_is_send, check_is_sync};

    #[test]
    fn test_with_words() {
        let vocab = Vocabulary::<u32>::with_words(["the", "a", "Hello"]).unwrap();
        check_is_send(&vocab);
        check_is_sync(&vocab);

        assert_eq!(vocab.size(), 7);
        assert_eq!(
            vocab.tokens().collect::<Vec<_>>(),
            vec!["<UNK>", "<PAD>", "<BOS>", "<EOS>", "the", "a", "Hello"]
        );

        assert_eq!(vocab.id_for("Hello"), 6);
        assert_eq!(vocab.get_id("Hello"), Some(6));
        assert_eq!(vocab.token_for(6), Ok("Hello"));

        assert_eq!(vocab.unk_id(), 0);
        assert_eq!(vocab.pad_id(), 1);
        assert_eq!(vocab.bos_id(), 2);
        assert_eq!(vocab.eos_id(), 3);
    }

    #[test]
    fn test_unknown_lookup() {
        let vocab = Vocabulary::<u16>::with_words(["the"]).unwrap();

        assert_eq!(vocab.id_for("missing"), vocab.unk_id());
        assert_eq!(vocab.get_id("missing"), None);
        assert!(!vocab.contains("missing"));
        assert!(vocab.contains("the"));

        assert_eq!(
            vocab.token_for(999),
            Err(TokenizerError::OutOfRange { id: 999, size: 5 })
        );
    }

    #[test]
    fn test_bijection() {
        let vocab = Vocabulary::<u32>::with_words(["x", "y", "z", "xy"]).unwrap();

        for (id, token) in vocab.iter() {
            assert_eq!(vocab.id_for(token), id);
            assert_eq!(vocab.token_for(id).unwrap(), token);
        }
        assert_eq!(vocab.iter().count(), vocab.size());
    }

    #[test]
    fn test_is_special() {
        let vocab = Vocabulary::<u32>::with_words(["the"]).unwrap();
        assert!(vocab.is_special(0));
        assert!(vocab.is_special(3));
        assert!(!vocab.is_special(4));
    }

    #[test]
    fn test_duplicate_token() {
        assert_eq!(
            Vocabulary::<u32>::with_words(["the", "a", "the"]),
            Err(TokenizerError::DuplicateToken {
                token: "the".to_string(),
                id: 6,
            })
        );
        assert_eq!(
            Vocabulary::<u32>::with_words(["<PAD>"]),
            Err(TokenizerError::DuplicateToken {
                token: "<PAD>".to_string(),
                id: 4,
            })
        );
    }

    #[test]
    fn test_misplaced_special() {
        assert_eq!(
            Vocabulary::<u32>::from_tokens(["<UNK>", "<BOS>", "<PAD>", "<EOS>"]),
            Err(TokenizerError::MisplacedSpecialToken {
                token: "<PAD>",
                id: 1,
            })
        );
        assert_eq!(
            Vocabulary::<u32>::from_tokens(["<UNK>"]),
            Err(TokenizerError::MisplacedSpecialToken {
                token: "<PAD>",
                id: 1,
            })
        );
    }

    #[test]
    fn test_token_overflow() {
        let words: Vec<String> = (0..300).map(|i| format!("w{i}")).collect();
        assert_eq!(
            Vocabulary::<u8>::with_words(&words),
            Err(TokenizerError::TokenOverflow { size: 257 })
        );
        assert!(Vocabulary::<u16>::with_words(&words).is_ok());
    }

    #[test]
    fn test_token_map() {
        let vocab = Vocabulary::<u32>::with_words(["the", "a"]).unwrap();

        let map = vocab.to_token_map();
        assert_eq!(map.len(), 6);
        assert_eq!(map["a"], 5);

        let rebuilt = Vocabulary::<u32>::from_token_map(map).unwrap();
        assert_eq!(rebuilt, vocab);
    }

    #[test]
    fn test_token_map_non_contiguous() {
        let entries = vec![
            ("<UNK>", 0),
            ("<PAD>", 1),
            ("<BOS>", 2),
            ("<EOS>", 3),
            ("gap", 5),
        ];
        assert_eq!(
            Vocabulary::<u32>::from_token_map(entries),
            Err(TokenizerError::NonContiguousIds {
                expected: 4,
                found: 5,
            })
        );
    }
}
