// ============================================================
// Layer 4 — Skip-gram Batcher
// ============================================================
// Turns the encoded corpus into fixed-size batches of
// (center, context) training pairs.
//
// How a batch is generated:
//   - A window is `span = 2 * skip_window + 1` consecutive ids;
//     the middle id is the center word, the others are its context.
//   - The cursor advances by ONE per window, so consecutive
//     windows overlap (a sliding window, not batch-aligned jumps).
//     When a window would run past the end of the corpus it wraps
//     around to the start — the corpus is treated as circular.
//   - From each window, `num_skips` context positions are drawn
//     uniformly at random, excluding the center position and any
//     position already drawn for this window. Each draw emits one
//     (center, context) pair.
//
// Example with skip_window=1 over corpus [10, 20, 30, 40, 50]:
//   window 1: [10, 20, 30]  center 20, contexts from {10, 30}
//   window 2: [20, 30, 40]  center 30, contexts from {20, 40}
//   window 3: [30, 40, 50]  center 40, contexts from {30, 50}
//   ...
//
// Center words therefore follow the corpus order deterministically;
// only the context choice within each window is random.
//
// The sampling loop can only terminate if a window has at least
// `num_skips` non-center positions, i.e. num_skips <= 2 * skip_window.
// That invariant is checked once at construction and reported as a
// configuration error, never discovered as a hang.
//
// Reference: Mikolov et al. (2013) word2vec paper
//            rand crate documentation

use anyhow::{bail, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Stateful batch generator over an encoded corpus.
/// Owns its cursor and its RNG — no process-wide state.
pub struct SkipGramBatcher {
    /// The encoded corpus the windows slide over
    data: Vec<i32>,

    /// Index of the first id of the current window; wraps modulo corpus length
    cursor: usize,

    /// Context words on each side of the center word
    skip_window: usize,

    /// (center, context) pairs generated per window
    num_skips: usize,

    /// Seeded at construction so runs are reproducible
    rng: StdRng,
}

impl SkipGramBatcher {
    /// Create a batcher over `data`, validating the sampling parameters.
    ///
    /// Errors if `skip_window` or `num_skips` is zero, if `num_skips`
    /// exceeds the `2 * skip_window` context slots a window offers, or if
    /// the corpus is shorter than one window.
    pub fn new(
        data:        Vec<i32>,
        skip_window: usize,
        num_skips:   usize,
        seed:        u64,
    ) -> Result<Self> {
        if skip_window == 0 {
            bail!("skip_window must be at least 1");
        }
        if num_skips == 0 {
            bail!("num_skips must be at least 1");
        }
        let span = 2 * skip_window + 1;
        if num_skips > span - 1 {
            bail!(
                "num_skips ({}) exceeds the {} context positions of a \
                 window with skip_window {} — sampling could never finish",
                num_skips,
                span - 1,
                skip_window,
            );
        }
        if data.len() < span {
            bail!(
                "Corpus of {} ids is shorter than one window of {} ids",
                data.len(),
                span,
            );
        }
        Ok(Self {
            data,
            cursor: 0,
            skip_window,
            num_skips,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Total ids in a window: context on both sides plus the center
    pub fn span(&self) -> usize {
        2 * self.skip_window + 1
    }

    /// Generate the next batch: two parallel vectors of exactly
    /// `batch_size` center ids and context ids.
    ///
    /// If `batch_size` is not a multiple of `num_skips`, the final
    /// window's contribution is truncated once the batch is full.
    pub fn next_batch(&mut self, batch_size: usize) -> (Vec<i32>, Vec<i32>) {
        let span   = self.span();
        let center = self.skip_window;

        let mut centers = Vec::with_capacity(batch_size);
        let mut labels  = Vec::with_capacity(batch_size);
        // Window positions already used as context for the current window
        let mut exclude: Vec<usize> = Vec::with_capacity(self.num_skips);

        while centers.len() < batch_size {
            let window = self.window();
            self.cursor = (self.cursor + 1) % self.data.len();

            exclude.clear();
            for _ in 0..self.num_skips {
                if centers.len() == batch_size {
                    break;
                }
                // Rejection sampling: retry until the pick is neither the
                // center nor a position already used for this window
                let mut pick = self.rng.gen_range(0..span);
                while pick == center || exclude.contains(&pick) {
                    pick = self.rng.gen_range(0..span);
                }
                exclude.push(pick);
                centers.push(window[center]);
                labels.push(window[pick]);
            }
        }

        (centers, labels)
    }

    /// The `span` ids starting at the cursor, wrapping circularly when the
    /// window runs past the end of the corpus.
    fn window(&self) -> Vec<i32> {
        let span = self.span();
        if self.cursor + span <= self.data.len() {
            return self.data[self.cursor..self.cursor + span].to_vec();
        }
        // Edge of the corpus: assemble the window modulo its length
        (0..span)
            .map(|i| self.data[(self.cursor + i) % self.data.len()])
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: [i32; 5] = [10, 20, 30, 40, 50];

    fn batcher(skip_window: usize, num_skips: usize, seed: u64) -> SkipGramBatcher {
        SkipGramBatcher::new(CORPUS.to_vec(), skip_window, num_skips, seed).unwrap()
    }

    #[test]
    fn test_batch_has_exactly_the_requested_size() {
        let mut b = batcher(1, 2, 1);
        for _ in 0..5 {
            let (centers, labels) = b.next_batch(8);
            assert_eq!(centers.len(), 8);
            assert_eq!(labels.len(), 8);
        }
    }

    #[test]
    fn test_first_window_emits_both_contexts() {
        // skip_window=1, num_skips=2: the first window is [10, 20, 30] with
        // center 20, and both context values must be used exactly once
        let mut b = batcher(1, 2, 42);
        let (centers, labels) = b.next_batch(2);

        assert_eq!(centers, vec![20, 20]);
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![10, 30]);
    }

    #[test]
    fn test_centers_follow_the_sliding_window_order() {
        let mut b = batcher(1, 2, 7);
        let (centers, _) = b.next_batch(6);
        assert_eq!(centers, vec![20, 20, 30, 30, 40, 40]);
    }

    #[test]
    fn test_windows_wrap_around_the_corpus_end() {
        let mut b = batcher(1, 2, 7);
        // 5 windows cover one full revolution of the 5-id corpus; the
        // last two windows wrap: centers 50 (window [40,50,10]) and
        // 10 (window [50,10,20])
        let (centers, _) = b.next_batch(10);
        assert_eq!(centers, vec![20, 20, 30, 30, 40, 40, 50, 50, 10, 10]);

        // The next batch starts a second revolution from the top
        let (centers, _) = b.next_batch(2);
        assert_eq!(centers, vec![20, 20]);
    }

    #[test]
    fn test_contexts_within_one_window_are_distinct() {
        // skip_window=2, num_skips=4 uses every context position of each
        // window, so any repeat within a window would be a sampling bug
        let corpus: Vec<i32> = (0..50).collect();
        let mut b = SkipGramBatcher::new(corpus, 2, 4, 3).unwrap();

        let (centers, labels) = b.next_batch(40);
        for window in 0..10 {
            let chunk = &labels[window * 4..(window + 1) * 4];
            let mut seen = chunk.to_vec();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), 4, "window {} repeated a context", window);
            // All four pairs of a window share one center
            let window_centers = &centers[window * 4..(window + 1) * 4];
            assert!(window_centers.windows(2).all(|p| p[0] == p[1]));
        }
    }

    #[test]
    fn test_odd_batch_size_truncates_the_last_window() {
        let mut b = batcher(1, 2, 9);
        let (centers, _) = b.next_batch(3);
        // Two pairs from the first window, one from the second
        assert_eq!(centers, vec![20, 20, 30]);

        // The cursor still advanced past the truncated window
        let (centers, _) = b.next_batch(2);
        assert_eq!(centers, vec![40, 40]);
    }

    #[test]
    fn test_same_seed_reproduces_the_same_batches() {
        let mut a = batcher(1, 2, 123);
        let mut b = batcher(1, 2, 123);
        assert_eq!(a.next_batch(16), b.next_batch(16));
    }

    #[test]
    fn test_zero_batch_size_is_a_no_op() {
        let mut a = batcher(1, 2, 5);
        let (centers, labels) = a.next_batch(0);
        assert!(centers.is_empty() && labels.is_empty());

        // Neither the cursor nor the RNG moved
        let mut fresh = batcher(1, 2, 5);
        assert_eq!(a.next_batch(4), fresh.next_batch(4));
    }

    #[test]
    fn test_num_skips_larger_than_context_is_rejected() {
        assert!(SkipGramBatcher::new(CORPUS.to_vec(), 1, 3, 0).is_err());
    }

    #[test]
    fn test_zero_parameters_are_rejected() {
        assert!(SkipGramBatcher::new(CORPUS.to_vec(), 0, 1, 0).is_err());
        assert!(SkipGramBatcher::new(CORPUS.to_vec(), 1, 0, 0).is_err());
    }

    #[test]
    fn test_corpus_shorter_than_a_window_is_rejected() {
        assert!(SkipGramBatcher::new(vec![1, 2], 1, 2, 0).is_err());
    }
}
