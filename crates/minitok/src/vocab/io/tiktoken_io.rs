//! # Tiktoken Vocabulary IO
//!
//! One `base64(token) id` entry per line.

use crate::types::TokenType;
use crate::vocab::Vocabulary;
use anyhow::Context;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Load a [`Vocabulary`] from a tiktoken vocab file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_vocab_from_tiktoken_path<T, P>(path: P) -> anyhow::Result<Vocabulary<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open vocab file {}", path.display()))?;

    load_vocab_from_tiktoken_reader(BufReader::new(file))
}

/// Load a [`Vocabulary`] from a tiktoken vocab [`BufRead`] stream.
///
/// Lines may appear in any order; the ids must cover `0..n` exactly.
pub fn load_vocab_from_tiktoken_reader<T, R>(reader: R) -> anyhow::Result<Vocabulary<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut entries: Vec<(String, u64)> = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let (chunk, id) = line
            .split_once(' ')
            .with_context(|| format!("line {}: expected `<base64> <id>`", lineno + 1))?;

        let chunk = BASE64_STANDARD
            .decode(chunk)
            .with_context(|| format!("line {}: invalid base64", lineno + 1))?;
        let token = String::from_utf8(chunk)
            .with_context(|| format!("line {}: token is not valid UTF-8", lineno + 1))?;

        let id: u64 = id
            .trim()
            .parse()
            .with_context(|| format!("line {}: invalid token id", lineno + 1))?;

        entries.push((token, id));
    }

    Ok(Vocabulary::from_token_map(entries)?)
}

/// Save a [`Vocabulary`] to a tiktoken vocab file.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_vocab_to_tiktoken_path<T: TokenType, P: AsRef<Path>>(
    vocab: &Vocabulary<T>,
    path: P,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create vocab file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    save_vocab_to_tiktoken_writer(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Save a [`Vocabulary`] to a [`Write`] writer, in id order.
pub fn save_vocab_to_tiktoken_writer<T, W>(
    vocab: &Vocabulary<T>,
    writer: &mut W,
) -> anyhow::Result<()>
where
    T: TokenType,
    W: Write,
{
    for (id, token) in vocab.iter() {
        writeln!(writer, "{} {}", BASE64_STANDARD.encode(token), id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TokenizerError;

    #[test]
    fn test_save_load_tiktoken() {
        type T = u32;

        let vocab = Vocabulary::<T>::with_words(["apple", "banana", "\u{2581}pear", " "]).unwrap();

        tempdir::TempDir::new("vocab_test")
            .and_then(|dir| {
                let path = dir.path().join("vocab.tiktoken");

                save_vocab_to_tiktoken_path(&vocab, &path).expect("Failed to save vocab");

                let loaded_vocab: Vocabulary<T> =
                    load_vocab_from_tiktoken_path(&path).expect("Failed to load vocab");

                assert_eq!(&vocab, &loaded_vocab);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_writer_format() {
        let vocab = Vocabulary::<u16>::with_words(["hi"]).unwrap();

        let mut buf: Vec<u8> = Vec::new();
        save_vocab_to_tiktoken_writer(&vocab, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "PFVOSz4= 0");
        assert_eq!(lines[4], "aGk= 4");
    }

    #[test]
    fn test_load_rejects_gaps() {
        let text = "PFVOSz4= 0\nPFBBRD4= 1\nPEJPUz4= 2\nPEVPUz4= 3\naGk= 5\n";

        let err = load_vocab_from_tiktoken_reader::<u32, _>(text.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TokenizerError>(),
            Some(&TokenizerError::NonContiguousIds {
                expected: 4,
                found: 5
            })
        );
    }

    #[test]
    fn test_load_rejects_malformed_line() {
        let err = load_vocab_from_tiktoken_reader::<u32, _>("no-id-here\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
