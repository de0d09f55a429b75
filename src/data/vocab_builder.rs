// ============================================================
// Layer 4 — Vocabulary Builder
// ============================================================
// Builds the frequency-ranked, size-bounded vocabulary from
// one pass over the token stream.
//
// How the selection works:
//   1. Count the frequency of every distinct token (one scan)
//   2. Decide how many real-token slots exist:
//        - all of them, if the stream has at most `size`
//          distinct tokens (no sentinel needed)
//        - size - 1 otherwise (one slot is held back for the
//          out-of-vocabulary sentinel, id 0)
//   3. Push every candidate through a min-heap bounded to that
//      slot count; whenever the heap overflows, evict the
//      lowest-frequency entry and add its frequency to the
//      out-of-vocabulary total
//   4. Sort the survivors by frequency descending and assign
//      ids in that order (sentinel first, when one exists)
//
// The bounded heap keeps selection at O(T log S) for T distinct
// tokens and capacity S — the stream never has to be fully sorted.
//
// Example with size 3 over "a b a c a b a":
//   frequencies: a=4 b=2 c=1, 3 distinct tokens fit in 3 slots,
//   so no sentinel: a→0, b→1, c→2.
//   With size 2 only one real slot survives: UNK→0 (freq 3), a→1.
//
// Reference: Rust Book §8 (Collections)
//            std::collections::BinaryHeap documentation

use anyhow::Result;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::domain::traits::TokenSource;
use crate::domain::vocabulary::{Vocabulary, OUT_OF_VOCABULARY};

/// Build a Vocabulary of at most `size` ids from one scan of `source`.
///
/// Ties between equal-frequency tokens are broken lexicographically and
/// deterministically: during selection the lexicographically greatest
/// token among ties is evicted first, and id assignment orders ties
/// ascending, so "apple" is always preferred over "zebra" at the same
/// frequency.
///
/// A read failure aborts the build; no partial vocabulary is returned.
pub fn build_vocabulary(source: &dyn TokenSource, size: usize) -> Result<Vocabulary> {
    // ── Pass over the stream: frequency per distinct token ────────────────────
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut total_tokens: u64 = 0;

    let mut stream = source.scan()?;
    while let Some(token) = stream.next_token()? {
        *counts.entry(token).or_insert(0) += 1;
        total_tokens += 1;
    }

    // Slots available for real tokens. One slot is held back for the
    // out-of-vocabulary id when the stream has more distinct tokens than fit.
    let slots = if counts.len() <= size {
        counts.len()
    } else {
        size.saturating_sub(1)
    };

    // ── Bounded min-heap selection ────────────────────────────────────────────
    // Reverse turns std's max-heap into a min-heap on (frequency, Reverse(token)),
    // so pop() always evicts the lowest frequency — and among equal frequencies
    // the lexicographically greatest token.
    let mut heap: BinaryHeap<Reverse<(u64, Reverse<String>)>> =
        BinaryHeap::with_capacity(slots + 1);
    let mut out_of_vocab: u64 = 0;

    for (token, &count) in &counts {
        heap.push(Reverse((count, Reverse(token.clone()))));
        if heap.len() > slots {
            if let Some(Reverse((evicted, _))) = heap.pop() {
                out_of_vocab += evicted;
            }
        }
    }

    // ── Sort survivors: frequency descending, token ascending ────────────────
    let mut retained: Vec<(u64, String)> = heap
        .into_iter()
        .map(|Reverse((count, Reverse(token)))| (count, token))
        .collect();
    retained.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    // ── Assign ids, sentinel first when anything was excluded ────────────────
    let sentinel = out_of_vocab > 0;
    let mut words  = Vec::with_capacity(retained.len() + 1);
    let mut freqs  = Vec::with_capacity(retained.len() + 1);
    if sentinel {
        words.push(OUT_OF_VOCABULARY.to_string());
        freqs.push(out_of_vocab);
    }
    for (count, token) in retained {
        words.push(token);
        freqs.push(count);
    }

    tracing::debug!(
        "Vocabulary built: {} entries from {} tokens ({} out-of-vocabulary)",
        words.len(),
        total_tokens,
        out_of_vocab,
    );

    Ok(Vocabulary::from_parts(words, freqs, sentinel, total_tokens))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::{TextSource, TokenScanner};
    use crate::domain::traits::{TokenSource, TokenStream};
    use std::io::{self, BufReader, Read};

    #[test]
    fn test_small_stream_keeps_every_token() {
        let source = TextSource::new("a b a c a b a");
        let vocab  = build_vocabulary(&source, 10).unwrap();

        assert_eq!(vocab.len(), 3);
        assert!(!vocab.has_sentinel());
        // Frequency order: a(4) → 0, b(2) → 1, c(1) → 2
        assert_eq!(vocab.id("a"), Some(0));
        assert_eq!(vocab.id("b"), Some(1));
        assert_eq!(vocab.id("c"), Some(2));
        assert_eq!(vocab.total_tokens(), 7);
    }

    #[test]
    fn test_exact_capacity_needs_no_sentinel() {
        let source = TextSource::new("a b a c a b a");
        let vocab  = build_vocabulary(&source, 3).unwrap();

        assert_eq!(vocab.len(), 3);
        assert!(!vocab.has_sentinel());
        assert_eq!(vocab.word(0), Some("a"));
    }

    #[test]
    fn test_capacity_overflow_creates_sentinel() {
        let source = TextSource::new("a b a c a b a");
        let vocab  = build_vocabulary(&source, 2).unwrap();

        // 3 distinct tokens in 2 slots: UNK takes id 0, "a" survives
        assert_eq!(vocab.len(), 2);
        assert!(vocab.has_sentinel());
        assert_eq!(vocab.word(0), Some(OUT_OF_VOCABULARY));
        assert_eq!(vocab.word(1), Some("a"));
        // Sentinel frequency = total tokens - retained frequency = 7 - 4
        assert_eq!(vocab.frequency(0), Some(3));
        // Excluded tokens all encode to the sentinel
        assert_eq!(vocab.encode("b"), Some(0));
        assert_eq!(vocab.encode("c"), Some(0));
    }

    #[test]
    fn test_round_trip_for_all_retained_tokens() {
        let source = TextSource::new("one two two three three three");
        let vocab  = build_vocabulary(&source, 10).unwrap();

        for word in ["one", "two", "three"] {
            assert_eq!(vocab.word(vocab.id(word).unwrap()), Some(word));
        }
    }

    #[test]
    fn test_frequencies_are_monotonic_in_id_order() {
        let source = TextSource::new("d d d d c c c b b a");
        let vocab  = build_vocabulary(&source, 3).unwrap();

        let first_real = if vocab.has_sentinel() { 1 } else { 0 };
        for id in first_real..(vocab.len() as i32 - 1) {
            assert!(vocab.frequency(id).unwrap() >= vocab.frequency(id + 1).unwrap());
        }
    }

    #[test]
    fn test_equal_frequencies_break_ties_lexicographically() {
        // Four distinct tokens, one occurrence each, two real slots:
        // the two lexicographically smallest survive
        let source = TextSource::new("delta charlie bravo alpha");
        let vocab  = build_vocabulary(&source, 3).unwrap();

        assert_eq!(vocab.word(0), Some(OUT_OF_VOCABULARY));
        assert_eq!(vocab.word(1), Some("alpha"));
        assert_eq!(vocab.word(2), Some("bravo"));
    }

    #[test]
    fn test_empty_stream_builds_empty_vocabulary() {
        let source = TextSource::new("");
        let vocab  = build_vocabulary(&source, 5).unwrap();

        assert!(vocab.is_empty());
        assert!(!vocab.has_sentinel());
        assert_eq!(vocab.total_tokens(), 0);
    }

    // A source whose reader fails mid-stream, to check error propagation
    struct FailingSource;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    impl TokenSource for FailingSource {
        fn scan(&self) -> anyhow::Result<Box<dyn TokenStream + '_>> {
            Ok(Box::new(TokenScanner::new(BufReader::new(FailingReader))))
        }
    }

    #[test]
    fn test_read_error_aborts_the_build() {
        assert!(build_vocabulary(&FailingSource, 5).is_err());
    }
}
