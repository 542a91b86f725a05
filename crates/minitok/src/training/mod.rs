//! # BPE Training
//!
//! [`BpeTrainer`] counts corpus words with a [`WordCounter`], indexes their
//! adjacent pairs with a [`PairIndex`], then greedily merges the most frequent
//! pair while maintaining the pair counts incrementally.

pub mod bpe_trainer;
pub mod merge_job;
pub mod pair_index;
pub mod word;
pub mod word_counter;

pub use bpe_trainer::{BpeTrainer, BpeTrainerOptions};
pub use pair_index::PairIndex;
pub use word::Word;
pub use word_counter::{WordCounter, WordCounterOptions};
