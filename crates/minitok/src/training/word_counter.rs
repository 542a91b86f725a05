//! # Word Counting
//!
//! Counts whitespace-delimited words, keeping them in first-appearance order.

use crate::errors::TokenizerError;
use crate::segmentation::TextSegmentor;
use crate::types::{CountType, StringChunkType};
use crate::util::validators;
use ahash::AHashMap;

/// Options for [`WordCounter`].
#[derive(Debug, Clone)]
pub struct WordCounterOptions {
    /// The regex pattern used for text splitting.
    pub pattern: String,

    /// Whether to use parallel processing for word counting.
    ///
    /// Requires the `rayon` feature to be enabled.
    pub parallel: bool,
}

impl Default for WordCounterOptions {
    fn default() -> Self {
        Self {
            pattern: String::from(crate::WHITESPACE_PATTERN),
            parallel: crate::DEFAULT_PARALLEL,
        }
    }
}

impl WordCounterOptions {
    /// Set the parallel processing option.
    pub fn with_parallel(
        self,
        parallel: bool,
    ) -> Self {
        Self { parallel, ..self }
    }

    /// Set the regex pattern used for text splitting.
    pub fn with_pattern(
        self,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            ..self
        }
    }
}

/// Ordered word counter.
///
/// `words[i]` was first seen before `words[i + 1]`; `counts[i]` is its count.
#[derive(Debug)]
pub struct WordCounter<K: StringChunkType, C: CountType> {
    parallel: bool,
    segmentor: TextSegmentor,
    words: Vec<K>,
    counts: Vec<C>,
    index: AHashMap<K, usize>,
}

impl<K: StringChunkType, C: CountType> WordCounter<K, C> {
    /// Create a new word counter.
    ///
    /// # Errors
    /// * [`TokenizerError::InvalidPattern`] if the pattern does not compile.
    /// * [`TokenizerError::ParallelUnavailable`] if `parallel` is set without `rayon`.
    pub fn new(options: WordCounterOptions) -> Result<Self, TokenizerError> {
        let parallel = validators::try_parallel(options.parallel)?;
        let segmentor = TextSegmentor::new(options.pattern)?;

        Ok(Self {
            parallel,
            segmentor,
            words: Vec::new(),
            counts: Vec::new(),
            index: AHashMap::new(),
        })
    }

    /// Get the parallel processing flag.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Get the regex pattern used for text splitting.
    pub fn pattern(&self) -> &str {
        self.segmentor.pattern()
    }

    /// The number of unique words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Have no words been seen?
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over `(word, count)` in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, C)> {
        self.words.iter().zip(self.counts.iter().copied())
    }

    /// Release the words and their counts, in first-appearance order.
    pub fn release(self) -> (Vec<K>, Vec<C>) {
        (self.words, self.counts)
    }

    /// Add `count` observations of `word`.
    pub fn observe(
        &mut self,
        word: &str,
        count: C,
    ) {
        match self.index.get(word) {
            Some(&idx) => self.counts[idx] += count,
            None => {
                let key = K::from(word);
                self.index.insert(key.clone(), self.words.len());
                self.words.push(key);
                self.counts.push(count);
            }
        }
    }

    /// Update word counts inplace from text.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        for word in self.segmentor.split_spans(text.as_ref()) {
            self.observe(word, C::one());
        }
    }

    /// Update word counts inplace from a batch of samples.
    pub fn update_from_samples<S>(
        &mut self,
        samples: &[S],
    ) where
        S: AsRef<str> + Sync,
    {
        if self.parallel {
            #[cfg(feature = "rayon")]
            self.update_from_samples_rayon(samples);
        } else {
            self.update_from_samples_serial(samples);
        }
    }

    /// Update word counts inplace from a batch of samples.
    ///
    /// Uses serial processing, ignoring the `parallel` flag.
    pub fn update_from_samples_serial<S>(
        &mut self,
        samples: &[S],
    ) where
        S: AsRef<str>,
    {
        for sample in samples {
            self.update_from_text(sample);
        }
    }

    /// Update word counts inplace from a batch of samples.
    ///
    /// Uses parallel processing, ignoring the `parallel` flag.
    /// Samples are split concurrently and merged in sample order, so the
    /// result is identical to [`WordCounter::update_from_samples_serial`].
    #[cfg(feature = "rayon")]
    pub fn update_from_samples_rayon<S>(
        &mut self,
        samples: &[S],
    ) where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        let segmentor = &self.segmentor;
        let local_counts: Vec<Vec<(&str, C)>> = samples
            .par_iter()
            .map(|sample| {
                let mut order: Vec<(&str, C)> = Vec::new();
                let mut seen: AHashMap<&str, usize> = AHashMap::new();
                for word in segmentor.split_spans(sample.as_ref()) {
                    match seen.get(word) {
                        Some(&idx) => order[idx].1 += C::one(),
                        None => {
                            seen.insert(word, order.len());
                            order.push((word, C::one()));
                        }
                    }
                }
                order
            })
            .collect();

        for (word, count) in local_counts.into_iter().flatten() {
            self.observe(word, count);
        }
    }
}
