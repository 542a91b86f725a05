//! # Vocabulary IO

pub mod tiktoken_io;

pub use tiktoken_io::*;
