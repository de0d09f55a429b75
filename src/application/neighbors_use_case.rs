// ============================================================
// Layer 2 — NeighborsUseCase
// ============================================================
// Loads a trained checkpoint and prints the nearest neighbours
// of chosen words, or of a random sample of frequent words when
// no words are given (the same sampling the training loop does).

use anyhow::Result;
use burn::prelude::*;

use crate::domain::vocabulary::Vocabulary;
use crate::infra::{checkpoint::CheckpointManager, vocab_store::VocabStore};
use crate::ml::model::{SkipGramConfig, SkipGramModel};
use crate::ml::neighbors;

type InferBackend = burn::backend::Wgpu;

pub struct NeighborsUseCase {
    model:      SkipGramModel<InferBackend>,
    vocabulary: Vocabulary,
}

impl NeighborsUseCase {
    /// Rebuild the trained model from the checkpoint directory:
    /// config → model shape, vocabulary → id table, recorder → weights.
    pub fn new(checkpoint_dir: impl Into<String>) -> Result<Self> {
        let checkpoint_dir = checkpoint_dir.into();
        let device = burn::backend::wgpu::WgpuDevice::default();

        let ckpt_manager = CheckpointManager::new(checkpoint_dir.clone());
        let cfg          = ckpt_manager.load_config()?;
        let vocabulary   = VocabStore::new(checkpoint_dir).load()?;

        let model_cfg = SkipGramConfig::new(vocabulary.len(), cfg.embedding_dim);
        let model: SkipGramModel<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");

        Ok(Self { model, vocabulary })
    }

    /// Print the `top_k` nearest neighbours of each word in `words`.
    /// With an empty word list, a random sample of the most frequent
    /// words is used instead.
    pub fn print_neighbors(&self, words: &[String], top_k: usize) -> Result<()> {
        let ids = if words.is_empty() {
            let mut rng = rand::thread_rng();
            neighbors::sample_frequent_ids(self.vocabulary.len(), &mut rng)
        } else {
            words
                .iter()
                .map(|w| {
                    self.vocabulary.id(w).ok_or_else(|| {
                        anyhow::anyhow!("Word '{}' is not in the vocabulary", w)
                    })
                })
                .collect::<Result<Vec<i32>>>()?
        };

        neighbors::print_nearest(&self.model, &self.vocabulary, &ids, top_k);
        Ok(())
    }
}
