//! # BPE Trainer

use crate::errors::TokenizerError;
use crate::tokenizers::BpeTokenizer;
use crate::training::merge_job::MergeJob;
use crate::training::pair_index::PairIndex;
use crate::training::word::Word;
use crate::training::word_counter::{WordCounter, WordCounterOptions};
use crate::types::{CountType, Pair, StringChunkType, TokenType};
use crate::util::validators;
use crate::vocab::{MergeRules, NUM_SPECIAL_TOKENS, Vocabulary};
use ahash::AHashSet;
use alloc::sync::Arc;
use compact_str::CompactString;
use dary_heap::OctonaryHeap;
use std::collections::{BTreeMap, BTreeSet};

/// Options for [`BpeTrainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BpeTrainerOptions {
    /// The vocabulary size to stop at, special tokens included.
    pub target_vocab_size: usize,

    /// Whether to use parallel processing for counting and indexing.
    ///
    /// Requires the `rayon` feature to be enabled.
    pub parallel: bool,
}

impl Default for BpeTrainerOptions {
    fn default() -> Self {
        Self::new(crate::DEFAULT_VOCAB_SIZE)
    }
}

impl BpeTrainerOptions {
    /// Create new options.
    pub fn new(target_vocab_size: usize) -> Self {
        Self {
            target_vocab_size,
            parallel: crate::DEFAULT_PARALLEL,
        }
    }

    /// Sets the target vocab size.
    ///
    /// # Arguments
    /// * `target_vocab_size` - must hold the special tokens plus the corpus alphabet.
    pub fn with_target_vocab_size(
        self,
        target_vocab_size: usize,
    ) -> Self {
        Self {
            target_vocab_size,
            ..self
        }
    }

    /// Sets the parallel processing flag.
    pub fn with_parallel(
        self,
        parallel: bool,
    ) -> Self {
        Self { parallel, ..self }
    }

    /// Initializes a [`BpeTrainer`] from these options.
    ///
    /// # Parameters
    /// * `K` - the type used to store strings in the word counts.
    /// * `C` - the type used to store counts in the word counts.
    pub fn init<K, C>(self) -> Result<BpeTrainer<K, C>, TokenizerError>
    where
        K: StringChunkType,
        C: CountType,
    {
        BpeTrainer::init(self)
    }
}

/// Trainer for learning byte-pair merges.
///
/// Training:
/// 1. every word is prefixed with [`crate::WORD_BOUNDARY_MARKER`] and split
///    into characters;
/// 2. the initial vocabulary is the special tokens, then the distinct
///    characters sorted by code point;
/// 3. the most frequent adjacent pair (weighted by word count) is merged, with
///    ties going to the pair observed first; a pair whose concatenation is
///    already a token (such as a special token spelled out in the corpus) is
///    never merged;
/// 4. step 3 repeats until the vocabulary reaches the target size, or the
///    best pair occurs fewer than twice.
///
/// # Parameters
/// * `K` - the type used to store strings in the word counts.
/// * `C` - the type used to store counts in the word counts.
pub struct BpeTrainer<K = CompactString, C = u32>
where
    K: StringChunkType,
    C: CountType,
{
    /// Trainer options.
    pub options: BpeTrainerOptions,

    /// The word counter.
    pub word_counter: WordCounter<K, C>,
}

impl<K, C> BpeTrainer<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Initializes a [`BpeTrainer`].
    pub fn init(options: BpeTrainerOptions) -> Result<Self, TokenizerError> {
        let word_counter =
            WordCounter::new(WordCounterOptions::default().with_parallel(options.parallel))?;

        Ok(BpeTrainer {
            options,
            word_counter,
        })
    }

    /// Update the word counts inplace from a text string.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        self.word_counter.update_from_text(text);
    }

    /// Update word counts inplace from a batch of samples.
    pub fn update_from_samples<S>(
        &mut self,
        samples: &[S],
    ) where
        S: AsRef<str> + Sync,
    {
        self.word_counter.update_from_samples(samples);
    }

    /// Trains a [`BpeTokenizer<T>`].
    ///
    /// # Parameters
    /// * `T` - the [`TokenType`] of the trained vocab.
    ///
    /// # Errors
    /// * [`TokenizerError::EmptyCorpus`] if no words were counted.
    /// * [`TokenizerError::VocabSizeTooSmall`] if the target cannot hold the
    ///   special tokens plus the alphabet.
    /// * [`TokenizerError::TokenOverflow`] if the target does not fit in `T`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn train<T>(self) -> Result<BpeTokenizer<T>, TokenizerError>
    where
        T: TokenType,
    {
        let target_vocab_size = self.options.target_vocab_size;
        let parallel = self.options.parallel;

        let (keys, word_counts) = self.word_counter.release();
        if keys.is_empty() {
            return Err(TokenizerError::EmptyCorpus);
        }

        let alphabet: BTreeSet<char> = keys
            .iter()
            .flat_map(|k| k.as_ref().chars())
            .chain([crate::WORD_BOUNDARY_MARKER])
            .collect();
        validators::try_vocab_size(target_vocab_size, NUM_SPECIAL_TOKENS + alphabet.len())?;

        let mut vocab: Vocabulary<T> =
            Vocabulary::with_words(alphabet.iter().map(|c| c.to_string()))?;
        let mut merges: MergeRules<T> = MergeRules::default();

        let mut buf = [0u8; 4];
        let mut words: Vec<Word<T>> = keys
            .iter()
            .map(|k| {
                let symbols: Vec<T> = [crate::WORD_BOUNDARY_MARKER]
                    .into_iter()
                    .chain(k.as_ref().chars())
                    .map(|c| vocab.id_for(c.encode_utf8(&mut buf)))
                    .collect();
                Word::from_tokens(symbols)
            })
            .collect();
        drop(keys);

        let num_merges = target_vocab_size - vocab.size();
        log::info!(
            "Starting BPE training: {} words, {} base symbols, up to {} merges",
            words.len(),
            vocab.size(),
            num_merges
        );

        log::info!("Building pair index...");
        let PairIndex {
            mut pair_counts,
            pair_to_word_index: mut pair_words,
            first_seen: mut pair_order,
        } = PairIndex::index_unique_word_counts_table(&words, &word_counts, parallel);

        let zero = C::zero();
        let two = C::one() + C::one();

        // ---- Build heap ----
        log::info!("Building heap with {} unique pairs", pair_counts.len());
        let mut heap = OctonaryHeap::with_capacity(pair_counts.len());
        for (&pair, &count) in pair_counts.iter() {
            if count > zero {
                heap.push(MergeJob {
                    count,
                    pair,
                    order: pair_order[&pair],
                });
            }
        }

        // ---- Merge loop ----
        log::info!("Starting merge loop");
        let mut merges_done = 0;
        let mut last_log_percent = 0;

        // Pairs whose concatenation is already a token; never merged.
        let mut blocked: AHashSet<Pair<T>> = AHashSet::new();

        while vocab.size() < target_vocab_size {
            let Some(mut job) = heap.pop() else {
                break;
            };
            if blocked.contains(&job.pair) {
                continue;
            }

            {
                // Lazy refresh the job count.
                let current = pair_counts.get(&job.pair).copied().unwrap_or(zero);
                if job.count != current {
                    job.count = current;
                    if job.count > zero {
                        heap.push(job);
                    }
                    continue;
                }
            }

            if job.count < two {
                log::debug!("Best pair occurs fewer than twice; stopping");
                break;
            }

            let merged = format!(
                "{}{}",
                vocab.token_for(job.pair.0)?,
                vocab.token_for(job.pair.1)?
            );
            if vocab.contains(&merged) {
                // e.g. `<UNK` + `>` spelling a special token.
                log::debug!("Skipping pair {:?}: {:?} is already a token", job.pair, merged);
                blocked.insert(job.pair);
                pair_counts.remove(&job.pair);
                pair_words.remove(&job.pair);
                continue;
            }
            let new_token = vocab.push(&merged)?;
            merges.push(job.pair, new_token);

            let word_indices = pair_words.remove(&job.pair).unwrap_or_default();

            // Pairs gaining occurrences, in creation order.
            let mut added: BTreeMap<usize, Pair<T>> = BTreeMap::new();
            for &word_idx in &word_indices {
                let word_count = word_counts[word_idx];
                words[word_idx].merge_pair_cb(job.pair, new_token, &mut |pair, delta| {
                    if blocked.contains(&pair) {
                        return;
                    }
                    let count = pair_counts.entry(pair).or_default();
                    if delta < 0 {
                        *count -= word_count;
                    } else {
                        *count += word_count;
                        pair_words.entry(pair).or_default().insert(word_idx);

                        let next = pair_order.len();
                        let order = *pair_order.entry(pair).or_insert(next);
                        added.insert(order, pair);
                    }
                });
            }
            pair_counts.remove(&job.pair);

            for (order, pair) in added {
                let count = pair_counts.get(&pair).copied().unwrap_or(zero);
                if count > zero {
                    heap.push(MergeJob { count, pair, order });
                }
            }

            merges_done += 1;
            log::debug!(
                "Merge {}: {:?} -> {:?} {:?} (frequency: {})",
                merges_done,
                job.pair,
                new_token,
                merged,
                job.count
            );

            // Log progress every 1%
            let current_percent = (merges_done * 100) / num_merges.max(1);
            if current_percent > last_log_percent {
                log::info!(
                    "Progress: {}% ({}/{} merges) - Last merge: {:?} -> {:?} (frequency: {})",
                    current_percent,
                    merges_done,
                    num_merges,
                    job.pair,
                    new_token,
                    job.count
                );
                last_log_percent = current_percent;
            }
        }

        vocab.shrink_to_fit();
        merges.shrink_to_fit();

        log::info!(
            "Finished training: {} merges completed, vocab size {}",
            merges_done,
            vocab.size()
        );

        Ok(BpeTokenizer::from_parts(
            Arc::new(vocab),
            Arc::new(merges),
            target_vocab_size,
        ))
    }
}
