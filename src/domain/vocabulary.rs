use std::collections::HashMap;

/// Token string shown for the reserved out-of-vocabulary slot.
pub const OUT_OF_VOCABULARY: &str = "UNK";

/// Id of the out-of-vocabulary slot, when one exists.
pub const SENTINEL_ID: i32 = 0;

/// A bounded, frequency-ranked mapping between tokens and dense integer ids.
///
/// Ids are contiguous from 0 and assigned in decreasing frequency order:
/// the most frequent token gets the lowest non-sentinel id. When the source
/// stream had more distinct tokens than the configured capacity, id 0 is the
/// out-of-vocabulary sentinel and its frequency is the summed frequency of
/// every excluded token. Built once by the vocabulary builder, immutable
/// thereafter.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// id → token, ordered by id
    words: Vec<String>,

    /// id → frequency in the source stream
    /// (for the sentinel: total frequency of all excluded tokens)
    counts: Vec<u64>,

    /// token → id, the inverse of `words`
    index: HashMap<String, i32>,

    /// Whether id 0 is the out-of-vocabulary sentinel
    sentinel: bool,

    /// Total number of tokens observed while building (not distinct tokens)
    total_tokens: u64,
}

impl Vocabulary {
    /// Assemble a Vocabulary from its id-ordered parts.
    /// `words` and `counts` must be parallel and ordered by id.
    pub fn from_parts(
        words:        Vec<String>,
        counts:       Vec<u64>,
        sentinel:     bool,
        total_tokens: u64,
    ) -> Self {
        debug_assert_eq!(words.len(), counts.len());
        let index = words
            .iter()
            .enumerate()
            .map(|(id, w)| (w.clone(), id as i32))
            .collect();
        Self { words, counts, index, sentinel, total_tokens }
    }

    /// Number of ids in the vocabulary, sentinel included
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Exact lookup: the id of `token`, or None if it was not retained
    pub fn id(&self, token: &str) -> Option<i32> {
        self.index.get(token).copied()
    }

    /// Encoding lookup: like `id`, but unknown tokens fall back to the
    /// sentinel id when a sentinel exists. Returns None only when the
    /// token is unknown AND the vocabulary has no sentinel slot.
    pub fn encode(&self, token: &str) -> Option<i32> {
        match self.index.get(token) {
            Some(&id)                => Some(id),
            None if self.sentinel    => Some(SENTINEL_ID),
            None                     => None,
        }
    }

    /// The token for `id`, or None if out of range
    pub fn word(&self, id: i32) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
    }

    /// The frequency recorded for `id`, or None if out of range
    pub fn frequency(&self, id: i32) -> Option<u64> {
        usize::try_from(id).ok().and_then(|i| self.counts.get(i)).copied()
    }

    pub fn has_sentinel(&self) -> bool {
        self.sentinel
    }

    /// Total tokens seen in the stream the vocabulary was built from
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// id → token table, ordered by id
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// id → frequency table, ordered by id
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vocabulary {
        // "the" appeared 5 times, "cat" twice; 3 other tokens were excluded
        Vocabulary::from_parts(
            vec![OUT_OF_VOCABULARY.into(), "the".into(), "cat".into()],
            vec![3, 5, 2],
            true,
            10,
        )
    }

    #[test]
    fn test_round_trip_id_and_word() {
        let v = sample();
        for word in ["the", "cat"] {
            let id = v.id(word).unwrap();
            assert_eq!(v.word(id), Some(word));
        }
    }

    #[test]
    fn test_encode_unknown_with_sentinel() {
        let v = sample();
        assert_eq!(v.encode("dog"), Some(SENTINEL_ID));
        assert_eq!(v.encode("the"), Some(1));
    }

    #[test]
    fn test_encode_unknown_without_sentinel() {
        let v = Vocabulary::from_parts(
            vec!["a".into(), "b".into()],
            vec![4, 1],
            false,
            5,
        );
        assert_eq!(v.encode("a"), Some(0));
        assert_eq!(v.encode("zebra"), None);
    }

    #[test]
    fn test_frequency_lookup() {
        let v = sample();
        assert_eq!(v.frequency(0), Some(3)); // summed excluded frequency
        assert_eq!(v.frequency(1), Some(5));
        assert_eq!(v.frequency(99), None);
        assert_eq!(v.frequency(-1), None);
    }

    #[test]
    fn test_total_tokens_recorded() {
        assert_eq!(sample().total_tokens(), 10);
    }
}
