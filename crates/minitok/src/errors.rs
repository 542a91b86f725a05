//! # Tokenizer Errors

/// Errors produced by vocabularies, tokenizers and the BPE trainer.
///
/// Unknown words or characters during encoding are *not* errors;
/// they map to the `<UNK>` token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizerError {
    /// A token id has no entry in the vocabulary.
    ///
    /// Raised by decoding; signals an upstream bug rather than bad user input.
    #[error("token id {id} is out of range for a vocabulary of size {size}")]
    OutOfRange {
        /// The offending id.
        id: u64,
        /// The vocabulary size.
        size: usize,
    },

    /// A requested preset vocabulary does not exist.
    #[error("unknown vocabulary preset {name:?}; expected one of {expected:?}")]
    UnknownPreset {
        /// The requested name.
        name: String,
        /// The known preset names.
        expected: &'static [&'static str],
    },

    /// BPE training was invoked with no words.
    #[error("cannot train on an empty corpus")]
    EmptyCorpus,

    /// The target vocab size cannot hold the special tokens and the corpus alphabet.
    #[error("target vocab size ({vocab_size}) must be >= {required} (special tokens + alphabet)")]
    VocabSizeTooSmall {
        /// The requested size.
        vocab_size: usize,
        /// The minimum size.
        required: usize,
    },

    /// The same token string appears twice.
    #[error("duplicate token {token:?} at id {id}")]
    DuplicateToken {
        /// The repeated token.
        token: String,
        /// The id of the second occurrence.
        id: u64,
    },

    /// Vocabulary ids do not form the range `0..size`.
    #[error("vocabulary ids are not contiguous: expected id {expected}, found {found}")]
    NonContiguousIds {
        /// The next expected id.
        expected: u64,
        /// The id that was found instead.
        found: u64,
    },

    /// A reserved special token is missing or not at its fixed id.
    #[error("special token {token:?} must have id {id}")]
    MisplacedSpecialToken {
        /// The special token.
        token: &'static str,
        /// Its required id.
        id: usize,
    },

    /// The vocabulary has more entries than the token type can index.
    #[error("vocabulary of size {size} does not fit in the token type")]
    TokenOverflow {
        /// The size that did not fit.
        size: usize,
    },

    /// A merge rule names a symbol, or produces a symbol, missing from the vocabulary.
    #[error("merge rule refers to unknown symbol {symbol:?}")]
    UnknownMergeSymbol {
        /// The missing symbol.
        symbol: String,
    },

    /// The same pair is merged twice.
    #[error("duplicate merge rule ({left:?}, {right:?})")]
    DuplicateMergeRule {
        /// The left symbol.
        left: String,
        /// The right symbol.
        right: String,
    },

    /// A split pattern failed to compile.
    #[error("regex pattern compilation failed: {pattern:?}")]
    InvalidPattern {
        /// The pattern.
        pattern: String,
    },

    /// Persisted state describes a different kind of tokenizer.
    #[error("expected a {expected:?} tokenizer, found {found:?}")]
    KindMismatch {
        /// The kind being loaded.
        expected: &'static str,
        /// The kind in the document.
        found: &'static str,
    },

    /// Parallel processing was requested without the `rayon` feature.
    #[error("parallel processing requires the `rayon` feature to be enabled")]
    ParallelUnavailable,
}

impl TokenizerError {
    /// Build an [`TokenizerError::OutOfRange`] for any id type.
    pub fn out_of_range<I: num_traits::ToPrimitive>(
        id: I,
        size: usize,
    ) -> Self {
        Self::OutOfRange {
            id: id.to_u64().unwrap_or(u64::MAX),
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TokenizerError::out_of_range(999_u32, 19).to_string(),
            "token id 999 is out of range for a vocabulary of size 19"
        );
        assert_eq!(
            TokenizerError::EmptyCorpus.to_string(),
            "cannot train on an empty corpus"
        );
        assert_eq!(
            TokenizerError::UnknownPreset {
                name: "nonexistent".to_string(),
                expected: &["simple"],
            }
            .to_string(),
            r#"unknown vocabulary preset "nonexistent"; expected one of ["simple"]"#
        );
    }

    #[test]
    fn test_errors_are_anyhow_compatible() {
        let err: anyhow::Error = TokenizerError::EmptyCorpus.into();
        assert_eq!(
            err.downcast_ref::<TokenizerError>(),
            Some(&TokenizerError::EmptyCorpus)
        );
    }
}
