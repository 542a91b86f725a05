//! # BPE Merge Rules

use crate::errors::TokenizerError;
use crate::types::{Pair, PairRankMap, TokenType};
use crate::vocab::vocabulary::Vocabulary;

/// A learned merge: `pair -> merged`, preferred by ascending `rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRule<T: TokenType> {
    /// The adjacent pair to merge.
    pub pair: Pair<T>,

    /// The replacement symbol.
    pub merged: T,

    /// The learning order; lower is applied first.
    pub rank: usize,
}

/// An ordered list of [`MergeRule`]s, with a `pair -> rank` index.
#[derive(Debug, Clone)]
pub struct MergeRules<T: TokenType> {
    /// `rules[rank].rank == rank`.
    rules: Vec<MergeRule<T>>,

    /// Reverse index of `rules`.
    ranks: PairRankMap<T>,
}

impl<T: TokenType> PartialEq for MergeRules<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.rules == other.rules
    }
}

impl<T: TokenType> Eq for MergeRules<T> {}

impl<T: TokenType> Default for MergeRules<T> {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            ranks: PairRankMap::default(),
        }
    }
}

impl<T: TokenType> MergeRules<T> {
    /// The number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Are there no rules?
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeRule<T>> {
        self.rules.iter()
    }

    /// Look up the rule for `pair`.
    pub fn lookup(
        &self,
        pair: &Pair<T>,
    ) -> Option<&MergeRule<T>> {
        self.ranks.get(pair).map(|&rank| &self.rules[rank])
    }

    /// The rank of `pair`, or `usize::MAX` when it is not mergeable.
    fn pair_rank(
        &self,
        a: T,
        b: T,
    ) -> usize {
        self.ranks.get(&(a, b)).copied().unwrap_or(usize::MAX)
    }

    /// Append a rule at the next rank, returning that rank.
    ///
    /// The caller guarantees `pair` is not already present.
    pub(crate) fn push(
        &mut self,
        pair: Pair<T>,
        merged: T,
    ) -> usize {
        let rank = self.rules.len();
        self.rules.push(MergeRule { pair, merged, rank });
        self.ranks.insert(pair, rank);
        rank
    }

    /// Reduce the capacity of the internal storage to fit its contents.
    pub fn shrink_to_fit(&mut self) {
        self.rules.shrink_to_fit();
        self.ranks.shrink_to_fit();
    }

    /// Rewrite `symbols` by repeatedly merging the lowest-rank adjacent pair.
    ///
    /// Among equal ranks the leftmost pair is merged first; stops when no
    /// adjacent pair has a rule.
    pub fn apply(
        &self,
        symbols: &mut Vec<T>,
    ) {
        if self.is_empty() || symbols.len() < 2 {
            return;
        }

        // ranks[i] := rank of (symbols[i], symbols[i + 1])
        let mut ranks: Vec<usize> = symbols
            .windows(2)
            .map(|w| self.pair_rank(w[0], w[1]))
            .collect();

        while let Some((i, rank)) = ranks
            .iter()
            .copied()
            .enumerate()
            .min_by_key(|&(_, rank)| rank)
        {
            if rank == usize::MAX {
                break;
            }

            symbols[i] = self.rules[rank].merged;
            symbols.remove(i + 1);
            ranks.remove(i);

            if i > 0 {
                ranks[i - 1] = self.pair_rank(symbols[i - 1], symbols[i]);
            }
            if i < ranks.len() {
                ranks[i] = self.pair_rank(symbols[i], symbols[i + 1]);
            }
        }
    }

    /// Export the rules as `(left, right)` surface strings, in rank order.
    pub fn to_symbol_pairs(
        &self,
        vocab: &Vocabulary<T>,
    ) -> Result<Vec<(String, String)>, TokenizerError> {
        self.rules
            .iter()
            .map(|rule| {
                Ok((
                    vocab.token_for(rule.pair.0)?.to_string(),
                    vocab.token_for(rule.pair.1)?.to_string(),
                ))
            })
            .collect()
    }

    /// Rebuild rules from `(left, right)` surface strings, in rank order.
    ///
    /// # Errors
    /// * [`TokenizerError::UnknownMergeSymbol`] if `left`, `right` or `left + right`
    ///   is not in `vocab`.
    /// * [`TokenizerError::DuplicateMergeRule`] if a pair repeats.
    pub fn from_symbol_pairs<I, S>(
        vocab: &Vocabulary<T>,
        pairs: I,
    ) -> Result<Self, TokenizerError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let lookup = |symbol: &str| {
            vocab
                .get_id(symbol)
                .ok_or_else(|| TokenizerError::UnknownMergeSymbol {
                    symbol: symbol.to_string(),
                })
        };

        let mut rules = Self::default();
        for (left, right) in pairs {
            let (left, right) = (left.as_ref(), right.as_ref());
            let pair = (lookup(left)?, lookup(right)?);
            let merged = lookup(&format!("{left}{right}"))?;

            if rules.ranks.contains_key(&pair) {
                return Err(TokenizerError::DuplicateMergeRule {
                    left: left.to_string(),
                    right: right.to_string(),
                });
            }
            rules.push(pair, merged);
        }
        rules.shrink_to_fit();
        Ok(rules)
    }
}
