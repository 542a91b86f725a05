//! # Mini Tokenizers
//!
//! Text tokenizers built over a shared, immutable [`vocab::Vocabulary`]:
//!
//! * [`tokenizers::SimpleTokenizer`] - word / punctuation splitting over a fixed vocabulary.
//! * [`tokenizers::CharTokenizer`] - one token per character.
//! * [`tokenizers::BpeTokenizer`] - byte-pair encoding with merges learned from a corpus.
//!
//! # Preset Example
//!
//! ```rust,ignore
//! let tokenizer = SimpleTokenizer::<u32>::from_preset("simple")?;
//! assert_eq!(tokenizer.encode("Hello world!"), vec![6, 7, 8]);
//! assert_eq!(tokenizer.decode(&[6, 7, 8])?, "Hello world!");
//! ```
//!
//! # Training Example
//!
//! ```rust,ignore
//! let mut trainer = BpeTrainerOptions::new(500).init::<CompactString, u32>()?;
//! trainer.update_from_samples(&corpus);
//! let tokenizer: BpeTokenizer<u32> = trainer.train()?;
//!
//! tokenizer.save("tokenizer.json")?;
//! ```
#![warn(missing_docs, unused)]

extern crate alloc;

pub mod analysis;
pub mod errors;
pub mod segmentation;
pub mod tokenizers;
pub mod training;
pub mod types;
pub mod util;
pub mod vocab;

pub use errors::TokenizerError;
pub use tokenizers::{AnyTokenizer, BpeTokenizer, CharTokenizer, SimpleTokenizer, Tokenizer};
pub use vocab::{Vocabulary, load_sample_vocab};

/// Split pattern for [`tokenizers::SimpleTokenizer`].
///
/// Maximal runs of alphanumeric characters, or a single character that is neither
/// alphanumeric nor whitespace.
pub const WORD_PUNCTUATION_PATTERN: &str = r"[\p{Alphabetic}\p{N}]+|[^\s\p{Alphabetic}\p{N}]";

/// Split pattern for [`tokenizers::BpeTokenizer`]: runs of non-whitespace.
pub const WHITESPACE_PATTERN: &str = r"\S+";

/// Prefixed to every word seen by the BPE tokenizer; decodes to a space.
pub const WORD_BOUNDARY_MARKER: char = '\u{2581}';

/// Default target vocabulary size for BPE training.
pub const DEFAULT_VOCAB_SIZE: usize = 1000;

/// Default value for parallel processing; based on the `rayon` feature.
#[cfg(feature = "rayon")]
pub const DEFAULT_PARALLEL: bool = true;
/// Default value for parallel processing; based on the `rayon` feature.
#[cfg(not(feature = "rayon"))]
pub const DEFAULT_PARALLEL: bool = false;

/// Constant guess for the expected chars/token ratio.
pub const CHARS_PER_TOKEN_HINT: f64 = 4.0;
