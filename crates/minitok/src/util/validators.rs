//! Validators for various configuration options.
use crate::errors::TokenizerError;
use crate::types::TokenType;
use fancy_regex::Regex;

/// Validates a target vocabulary size against the minimum required size.
///
/// # Arguments
/// * `vocab_size` - the requested size.
/// * `required` - the size of the special tokens plus the corpus alphabet.
pub fn try_vocab_size(
    vocab_size: usize,
    required: usize,
) -> Result<usize, TokenizerError> {
    if vocab_size < required {
        Err(TokenizerError::VocabSizeTooSmall {
            vocab_size,
            required,
        })
    } else {
        Ok(vocab_size)
    }
}

/// Validates that `size` ids fit in `T`.
pub fn try_token_capacity<T: TokenType>(size: usize) -> Result<usize, TokenizerError> {
    if size == 0 || T::from_usize(size - 1).is_some() {
        Ok(size)
    } else {
        Err(TokenizerError::TokenOverflow { size })
    }
}

/// Validates and returns a compiled regex pattern.
pub fn try_regex(pattern: &str) -> Result<Regex, TokenizerError> {
    Regex::new(pattern).map_err(|_| TokenizerError::InvalidPattern {
        pattern: pattern.to_string(),
    })
}

/// Validates and returns a regex pattern, panicking if it fails to compile.
///
/// For the crate's built-in patterns only.
pub fn expect_regex<S: AsRef<str>>(pattern: S) -> Regex {
    try_regex(pattern.as_ref()).expect("regex pattern compilation failed")
}

/// Validates and returns parallel processing options.
pub fn try_parallel(parallel: bool) -> Result<bool, TokenizerError> {
    #[cfg(not(feature = "rayon"))]
    if parallel {
        return Err(TokenizerError::ParallelUnavailable);
    }
    Ok(parallel)
}
