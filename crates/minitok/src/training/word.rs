//! # Training Words

use crate::types::{Pair, TokenType};

/// A unique corpus word, as its current symbol sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word<T: TokenType> {
    tokens: Vec<T>,
}

impl<T: TokenType, S: AsRef<[T]>> From<S> for Word<T> {
    fn from(tokens: S) -> Self {
        Self::from_tokens(tokens)
    }
}

impl<T: TokenType> Word<T> {
    /// Create a new word from a list of ids.
    pub fn from_tokens<S>(tokens: S) -> Self
    where
        S: AsRef<[T]>,
    {
        Self {
            tokens: tokens.as_ref().to_vec(),
        }
    }

    /// Get a list of ids that make up this word.
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    /// Get the number of ids in this word.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Get an iterator over pairs of ids in this word.
    pub fn pairs(&self) -> impl Iterator<Item = Pair<T>> + '_ {
        self.tokens.windows(2).map(|w| (w[0], w[1]))
    }

    /// Reduce the capacity of the internal vector to fit its contents.
    pub fn shrink_to_fit(&mut self) {
        self.tokens.shrink_to_fit();
    }

    const INC: i32 = 1;
    const DEC: i32 = -1;

    /// Merge all non-overlapping occurrences of `pair -> replacement`, left to right.
    ///
    /// # Arguments
    /// * `pair` - the pair to merge.
    /// * `replacement` - the token to replace `pair` with.
    /// * `on_merge` - invoked for each incremental pair delta, in word order,
    ///   with `+1` for an added pair and `-1` for a removed pair.
    pub fn merge_pair_cb<F>(
        &mut self,
        pair: Pair<T>,
        replacement: T,
        on_merge: &mut F,
    ) where
        F: FnMut(Pair<T>, i32),
    {
        let (a, b) = pair;
        let n = self.tokens.len();
        if n < 2 {
            return;
        }

        // Compacts in place: `write <= read` always holds.
        let mut write = 0;
        let mut read = 0;
        while read < n {
            let current = self.tokens[read];

            if read + 1 < n && pair == (current, self.tokens[read + 1]) {
                if write > 0 {
                    let x = self.tokens[write - 1];
                    on_merge((x, a), Self::DEC);
                    on_merge((x, replacement), Self::INC);
                }

                on_merge(pair, Self::DEC);

                if read + 2 < n {
                    let y = self.tokens[read + 2];
                    on_merge((b, y), Self::DEC);
                    on_merge((replacement, y), Self::INC);
                }

                self.tokens[write] = replacement;
                read += 2;
            } else {
                self.tokens[write] = current;
                read += 1;
            }
            write += 1;
        }

        self.tokens.truncate(write);
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`.
    ///
    /// # Returns
    /// the `(pair, delta)` list reported by [`Word::merge_pair_cb`].
    pub fn merge_pair(
        &mut self,
        pair: Pair<T>,
        replacement: T,
    ) -> Vec<(Pair<T>, i32)> {
        let mut deltas: Vec<(Pair<T>, i32)> = Vec::with_capacity(6);
        self.merge_pair_cb(pair, replacement, &mut |p, d| deltas.push((p, d)));
        deltas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_from() {
        let word: Word<u32> = vec![1, 2, 3].into();
        assert_eq!(word.tokens(), &[1, 2, 3]);
        assert_eq!(word.len(), 3);

        let word: Word<u32> = [1, 2].into();
        assert_eq!(word.pairs().collect::<Vec<_>>(), vec![(1, 2)]);
    }

    #[test]
    fn test_word_merge_pair() {
        // ▁ l o w e r
        let mut word = Word::<u32>::from_tokens([14, 7, 9, 13, 5, 10]);

        let deltas = word.merge_pair((9, 13), 16);
        assert_eq!(word.tokens(), &[14, 7, 16, 5, 10]);
        assert_eq!(
            deltas,
            vec![((7, 9), -1), ((7, 16), 1), ((9, 13), -1), ((13, 5), -1), ((16, 5), 1)]
        );
    }

    #[test]
    fn test_word_merge_pair_repeated() {
        let mut word = Word::<u32>::from_tokens([1, 1, 1, 1, 2]);

        let mut deltas = Vec::new();
        word.merge_pair_cb((1, 1), 7, &mut |p, d| deltas.push((p, d)));
        assert_eq!(word.tokens(), &[7, 7, 2]);

        assert_eq!(
            deltas,
            vec![
                // first match
                ((1, 1), -1),
                ((1, 1), -1),
                ((7, 1), 1),
                // second match
                ((7, 1), -1),
                ((7, 7), 1),
                ((1, 1), -1),
                ((1, 2), -1),
                ((7, 2), 1),
            ]
        );

        let net: i32 = deltas
            .iter()
            .filter(|(p, _)| *p == (1, 1))
            .map(|(_, d)| d)
            .sum();
        assert_eq!(net, -3);
    }

    #[test]
    fn test_word_merge_pair_absent() {
        let mut word = Word::<u32>::from_tokens([1, 2, 3]);
        assert!(word.merge_pair((3, 1), 9).is_empty());
        assert_eq!(word.tokens(), &[1, 2, 3]);

        let mut word = Word::<u32>::from_tokens([1]);
        assert!(word.merge_pair((1, 1), 9).is_empty());
    }
}
