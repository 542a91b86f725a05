//! Pair Count / Word Indexing

use crate::training::word::Word;
use crate::types::{CountType, Pair, TokenType};
use ahash::AHashMap;
use std::collections::BTreeSet;

/// An index of [`Pair`]s over an index set of ``(word, count)``.
#[derive(Debug)]
pub struct PairIndex<T: TokenType, C: CountType> {
    /// A map from [`Pair`] to its occurrence count.
    ///
    /// ``sum(words[i].count(pair) * word_counts[i]) for all i``
    pub pair_counts: AHashMap<Pair<T>, C>,

    /// A map from [`Pair`] to the (ascending) indices of the words containing it.
    pub pair_to_word_index: AHashMap<Pair<T>, BTreeSet<usize>>,

    /// A map from [`Pair`] to its first-observation ordinal.
    ///
    /// Pairs are numbered in scan order: by word index, then by position.
    pub first_seen: AHashMap<Pair<T>, usize>,
}

impl<T: TokenType, C: CountType> PairIndex<T, C> {
    /// Build a [`PairIndex`] from a slice of [`Word`]s, using a count table.
    ///
    /// # Arguments
    /// * `words` - the slice of words; Words are assumed to be unique.
    /// * `word_counts` - `word_counts[i]` is the count of `words[i]`.
    /// * `parallel` - use `rayon` for the counting pass; must be validated by the caller.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(words, word_counts)))]
    pub fn index_unique_word_counts_table(
        words: &[Word<T>],
        word_counts: &[C],
        parallel: bool,
    ) -> Self {
        if parallel {
            #[cfg(feature = "rayon")]
            return Self::index_unique_word_counts_table_rayon(words, word_counts);
        }
        Self::index_unique_word_counts_table_serial(words, word_counts)
    }

    fn observe_word(
        pair_counts: &mut AHashMap<Pair<T>, C>,
        pair_to_word_index: &mut AHashMap<Pair<T>, BTreeSet<usize>>,
        index: usize,
        w: &Word<T>,
        word_count: C,
    ) {
        if word_count != C::zero() && w.len() >= 2 {
            for p in w.pairs() {
                *pair_counts.entry(p).or_default() += word_count;
                pair_to_word_index.entry(p).or_default().insert(index);
            }
        }
    }

    fn scan_first_seen(words: &[Word<T>]) -> AHashMap<Pair<T>, usize> {
        let mut first_seen: AHashMap<Pair<T>, usize> = AHashMap::new();
        for p in words.iter().flat_map(Word::pairs) {
            let next = first_seen.len();
            first_seen.entry(p).or_insert(next);
        }
        first_seen
    }

    /// Build a [`PairIndex`] serially.
    pub fn index_unique_word_counts_table_serial(
        words: &[Word<T>],
        word_counts: &[C],
    ) -> Self {
        let mut pair_counts: AHashMap<Pair<T>, C> = Default::default();
        let mut pair_to_word_index: AHashMap<Pair<T>, BTreeSet<usize>> = Default::default();

        for (word_index, word) in words.iter().enumerate() {
            Self::observe_word(
                &mut pair_counts,
                &mut pair_to_word_index,
                word_index,
                word,
                word_counts[word_index],
            );
        }

        Self {
            pair_counts,
            pair_to_word_index,
            first_seen: Self::scan_first_seen(words),
        }
    }

    /// Build a [`PairIndex`] with `rayon`.
    ///
    /// Counts and word sets are order-independent reductions; the
    /// first-observation ordinals are still assigned by a serial scan.
    #[cfg(feature = "rayon")]
    pub fn index_unique_word_counts_table_rayon(
        words: &[Word<T>],
        word_counts: &[C],
    ) -> Self {
        use rayon::prelude::*;

        let (pair_counts, pair_to_word_index) = words
            .par_iter()
            .enumerate()
            .fold(
                || (AHashMap::new(), AHashMap::new()),
                |(mut pc, mut pwi), (word_index, word)| {
                    Self::observe_word(
                        &mut pc,
                        &mut pwi,
                        word_index,
                        word,
                        word_counts[word_index],
                    );
                    (pc, pwi)
                },
            )
            .reduce(
                || (AHashMap::new(), AHashMap::new()),
                |(mut acc_pc, mut acc_pwi), (pc, pwi)| {
                    for (k, v) in pc {
                        *acc_pc.entry(k).or_default() += v;
                    }
                    for (k, s) in pwi {
                        acc_pwi.entry(k).or_default().extend(s);
                    }
                    (acc_pc, acc_pwi)
                },
            );

        Self {
            pair_counts,
            pair_to_word_index,
            first_seen: Self::scan_first_seen(words),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_index_serial() {
        test_pair_index(false);
    }

    #[test]
    #[cfg(feature = "rayon")]
    fn test_pair_index_parallel() {
        test_pair_index(true);
    }

    fn test_pair_index(parallel: bool) {
        let words: Vec<Word<u32>> = vec![
            Word::from_tokens([1, 2, 3]),
            Word::from_tokens([2, 3, 2, 3]),
            Word::from_tokens([4]),
            Word::from_tokens([3, 1]),
        ];
        let word_counts: Vec<u32> = vec![2, 1, 5, 3];

        let PairIndex {
            pair_counts,
            pair_to_word_index,
            first_seen,
        } = PairIndex::index_unique_word_counts_table(&words, &word_counts, parallel);

        let mut pair_counts: Vec<_> = pair_counts.into_iter().collect();
        pair_counts.sort();
        assert_eq!(
            pair_counts,
            vec![((1, 2), 2), ((2, 3), 4), ((3, 1), 3), ((3, 2), 1)]
        );

        let mut pair_to_word_index: Vec<_> = pair_to_word_index
            .into_iter()
            .map(|(p, wi)| (p, wi.into_iter().collect::<Vec<_>>()))
            .collect();
        pair_to_word_index.sort();
        assert_eq!(
            pair_to_word_index,
            vec![
                ((1, 2), vec![0]),
                ((2, 3), vec![0, 1]),
                ((3, 1), vec![3]),
                ((3, 2), vec![1]),
            ]
        );

        let mut first_seen: Vec<_> = first_seen.into_iter().collect();
        first_seen.sort_by_key(|(_, ordinal)| *ordinal);
        assert_eq!(
            first_seen,
            vec![((1, 2), 0), ((2, 3), 1), ((3, 2), 2), ((3, 1), 3)]
        );
    }
}
