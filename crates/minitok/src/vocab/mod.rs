//! # Vocabularies
//!
//! * [`Vocabulary`] - the `token <-> id` mapping shared by every tokenizer.
//! * [`MergeRules`] - the ranked pair merges of a BPE tokenizer.
//! * [`load_sample_vocab`] - named preset vocabularies.

pub mod io;
pub mod merge_rules;
pub mod presets;
pub mod special_tokens;
pub mod vocabulary;

pub use merge_rules::{MergeRule, MergeRules};
pub use presets::{PRESET_NAMES, load_sample_vocab};
pub use special_tokens::{NUM_SPECIAL_TOKENS, SpecialToken};
pub use vocabulary::Vocabulary;
