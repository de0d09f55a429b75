// ============================================================
// Layer 4 — Corpus Encoder
// ============================================================
// The second pass over the token stream: every token is
// replaced by its vocabulary id, in original order, one id
// per token. Tokens that were excluded from the vocabulary
// map to the out-of-vocabulary sentinel.

use anyhow::Result;

use crate::domain::traits::TokenSource;
use crate::domain::vocabulary::Vocabulary;

/// Encode the stream into its id sequence using a built Vocabulary.
///
/// The returned sequence has exactly one id per token in the stream. A
/// token that is absent from a sentinel-less vocabulary is an error — that
/// can only happen when `source` is not the stream the vocabulary was
/// built from, and silently mapping it to id 0 would alias the most
/// frequent real token.
pub fn encode_corpus(source: &dyn TokenSource, vocab: &Vocabulary) -> Result<Vec<i32>> {
    let mut stream = source.scan()?;
    let mut ids = Vec::new();

    while let Some(token) = stream.next_token()? {
        match vocab.encode(&token) {
            Some(id) => ids.push(id),
            None => anyhow::bail!(
                "Token '{}' is not in the vocabulary and there is no \
                 out-of-vocabulary slot — was the vocabulary built from \
                 a different corpus?",
                token
            ),
        }
    }

    Ok(ids)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::TextSource;
    use crate::data::vocab_builder::build_vocabulary;

    #[test]
    fn test_one_id_per_token_in_order() {
        let source = TextSource::new("a b a c a b a");
        let vocab  = build_vocabulary(&source, 10).unwrap();
        let ids    = encode_corpus(&source, &vocab).unwrap();

        // a→0, b→1, c→2 by frequency
        assert_eq!(ids, vec![0, 1, 0, 2, 0, 1, 0]);
        assert_eq!(ids.len() as u64, vocab.total_tokens());
    }

    #[test]
    fn test_excluded_tokens_map_to_sentinel() {
        let source = TextSource::new("a b a c a b a");
        let vocab  = build_vocabulary(&source, 2).unwrap();
        let ids    = encode_corpus(&source, &vocab).unwrap();

        // Only "a" survives (id 1); "b" and "c" collapse onto the sentinel
        assert_eq!(ids, vec![1, 0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_unknown_token_without_sentinel_is_an_error() {
        let vocab_source = TextSource::new("a a b");
        let vocab        = build_vocabulary(&vocab_source, 10).unwrap();

        let other = TextSource::new("a mystery");
        assert!(encode_corpus(&other, &vocab).is_err());
    }
}
