// ============================================================
// Layer 5 — Nearest Neighbours
// ============================================================
// Cosine-similarity lookup over the trained embeddings.
// Ids are assigned in frequency order, so the lowest ids are
// the most frequent words — "sample the frequent words" just
// means sampling from the first few ids.

use burn::prelude::*;
use rand::seq::SliceRandom;

use crate::domain::vocabulary::Vocabulary;
use crate::ml::model::SkipGramModel;

/// The frequent-word pool that periodic sampling draws from
const FREQUENT_POOL: usize = 20;

/// How many of the pool to show per sampling round
const SAMPLE_WORDS: usize = 10;

/// A random sample of the most frequent word ids (without replacement).
pub fn sample_frequent_ids(vocab_len: usize, rng: &mut impl rand::Rng) -> Vec<i32> {
    let mut pool: Vec<i32> = (0..FREQUENT_POOL.min(vocab_len) as i32).collect();
    pool.shuffle(rng);
    pool.truncate(SAMPLE_WORDS.min(pool.len()));
    pool
}

/// For each query word id, the `top_k` most cosine-similar words
/// (the query itself excluded), best first.
pub fn nearest_neighbors<B: Backend>(
    model:    &SkipGramModel<B>,
    vocab:    &Vocabulary,
    word_ids: &[i32],
    top_k:    usize,
) -> Vec<(String, Vec<(String, f32)>)> {
    let normalized = model.normalized_embeddings();
    let device     = normalized.device();

    // similarity[q][w] = cosine similarity of query q against word w
    let queries = Tensor::<B, 1, Int>::from_ints(word_ids, &device);
    let similarity = normalized
        .clone()
        .select(0, queries)
        .matmul(normalized.transpose());
    let scores: Vec<f32> = similarity.into_data().to_vec::<f32>().unwrap_or_default();

    let vocab_len = vocab.len();
    word_ids
        .iter()
        .enumerate()
        .map(|(row, &id)| {
            let row_scores = &scores[row * vocab_len..(row + 1) * vocab_len];

            let mut ranked: Vec<(usize, f32)> =
                row_scores.iter().copied().enumerate().collect();
            ranked.sort_by(|a, b| {
                b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
            });

            let neighbors = ranked
                .into_iter()
                .filter(|&(word, _)| word as i32 != id)
                .take(top_k)
                .filter_map(|(word, score)| {
                    vocab.word(word as i32).map(|w| (w.to_string(), score))
                })
                .collect();

            let query = vocab.word(id).unwrap_or("?").to_string();
            (query, neighbors)
        })
        .collect()
}

/// Print neighbours in one line per query word:
///   `     queen --> "king" (0.82), "royal" (0.77), ...`
pub fn print_nearest<B: Backend>(
    model:    &SkipGramModel<B>,
    vocab:    &Vocabulary,
    word_ids: &[i32],
    top_k:    usize,
) {
    println!("Closest neighbors:");
    for (query, neighbors) in nearest_neighbors(model, vocab, word_ids, top_k) {
        print!("{:>10} --> ", query);
        for (word, score) in &neighbors {
            print!("\"{}\" ({:.2}), ", word, score);
        }
        println!("...");
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_stays_within_the_frequent_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let ids = sample_frequent_ids(1000, &mut rng);

        assert_eq!(ids.len(), 10);
        assert!(ids.iter().all(|&id| (0..20).contains(&id)));

        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_sample_handles_tiny_vocabularies() {
        let mut rng = StdRng::seed_from_u64(1);
        let ids = sample_frequent_ids(3, &mut rng);
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|&id| (0..3).contains(&id)));
    }
}
