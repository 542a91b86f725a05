//! # Tokenizers

pub mod bpe_tokenizer;
pub mod char_tokenizer;
pub mod simple_tokenizer;
pub mod state;
pub mod tokenizer;

pub use bpe_tokenizer::BpeTokenizer;
pub use char_tokenizer::CharTokenizer;
pub use simple_tokenizer::SimpleTokenizer;
pub use state::{AnyTokenizer, TokenizerState, load_tokenizer, save_tokenizer};
pub use tokenizer::Tokenizer;
