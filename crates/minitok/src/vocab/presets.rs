//! # Sample Vocabularies
//!
//! Small named vocabularies for demos and tests.

use crate::errors::TokenizerError;
use crate::types::TokenType;
use crate::vocab::vocabulary::Vocabulary;

/// The known preset names.
pub const PRESET_NAMES: &[&str] = &["simple", "english", "code"];

const SIMPLE_WORDS: &[&str] = &[
    "the", "a", "Hello", "world", "!", "?", ".", ",", "straw", "berry", "ing", "ed", "er", "s",
    "ly",
];

const ENGLISH_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "I", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say",
    "her", "she", ".", ",", "!", "?", ";", ":", "\"", "'", "(", ")",
];

// Multi-character operators are left out; the word/punctuation split emits
// each punctuation character on its own.
const CODE_WORDS: &[&str] = &[
    "def", "class", "if", "else", "for", "while", "return", "import", "from", "as", "try",
    "except", "finally", "with", "lambda", "True", "False", "None", "and", "or", "not", "in", "is",
    "=", "!", "<", ">", "+", "-", "*", "/", "%", "(", ")", "[", "]", "{", "}", ":", ",", ".",
];

/// Load a named sample vocabulary.
///
/// Every preset starts with the special tokens at ids `0..4`.
/// The `"simple"` preset continues with `"the"` (4), `"a"` (5), `"Hello"` (6),
/// `"world"` (7) and `"!"` (8).
///
/// # Errors
/// [`TokenizerError::UnknownPreset`] for any name not in [`PRESET_NAMES`].
pub fn load_sample_vocab<T: TokenType>(name: &str) -> Result<Vocabulary<T>, TokenizerError> {
    let words = match name {
        "simple" => SIMPLE_WORDS,
        "english" => ENGLISH_WORDS,
        "code" => CODE_WORDS,
        _ => {
            return Err(TokenizerError::UnknownPreset {
                name: name.to_string(),
                expected: PRESET_NAMES,
            });
        }
    };
    log::debug!("Loading sample vocab {name:?}: {} words", words.len());
    Vocabulary::with_words(words)
}
