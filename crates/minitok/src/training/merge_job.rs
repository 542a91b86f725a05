//! # Merge Jobs

use crate::types::{CountType, Pair, TokenType};
use core::cmp::{Ordering, Reverse};

/// Info about a [`Pair`] that could be merged.
#[derive(Debug, Eq)]
pub struct MergeJob<T: TokenType, C: CountType> {
    /// The number of instances of this pair in the corpus, when queued.
    pub count: C,

    /// The pair to merge.
    pub pair: Pair<T>,

    /// The first-observation ordinal of the pair.
    pub order: usize,
}

impl<T: TokenType, C: CountType> MergeJob<T, C> {
    /// The job key.
    ///
    /// Max-heap by count; tie-break to the earliest observed pair.
    pub fn heap_key(&self) -> (C, Reverse<usize>) {
        (self.count, Reverse(self.order))
    }
}

impl<T: TokenType, C: CountType> PartialEq for MergeJob<T, C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.heap_key() == other.heap_key()
    }
}

impl<T: TokenType, C: CountType> PartialOrd for MergeJob<T, C> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TokenType, C: CountType> Ord for MergeJob<T, C> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key().cmp(&other.heap_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dary_heap::OctonaryHeap;

    #[test]
    fn test_merge_job_heap_key() {
        let job1: MergeJob<u32, u32> = MergeJob {
            count: 3,
            pair: (1, 2),
            order: 4,
        };
        let job2 = MergeJob {
            count: 2,
            pair: (2, 1),
            order: 0,
        };
        let job3 = MergeJob {
            count: 2,
            pair: (2, 2),
            order: 1,
        };

        assert_eq!(job1.heap_key(), (3, Reverse(4)));
        assert_eq!(&job1, &job1);
        assert_ne!(&job2, &job3);

        assert_eq!(job1.cmp(&job2), Ordering::Greater);
        assert_eq!(job2.cmp(&job3), Ordering::Greater);
        assert_eq!(job3.partial_cmp(&job2), Some(Ordering::Less));
    }

    #[test]
    fn test_merge_job_heap_order() {
        let mut heap: OctonaryHeap<MergeJob<u32, u32>> = OctonaryHeap::new();
        for (count, order) in [(2, 3), (5, 9), (2, 1), (5, 2), (1, 0)] {
            heap.push(MergeJob {
                count,
                pair: (0, 0),
                order,
            });
        }

        let popped: Vec<(u32, usize)> =
            std::iter::from_fn(|| heap.pop().map(|job| (job.count, job.order))).collect();
        assert_eq!(popped, vec![(5, 2), (5, 9), (2, 1), (2, 3), (1, 0)]);
    }
}
