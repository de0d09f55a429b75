// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Validate the configuration   (here)
//   Step 2: Open the corpus file         (Layer 4 - data)
//   Step 3: Build vocabulary + encode    (Layer 4 - data)
//   Step 4: Persist vocabulary + config  (Layer 6 - infra)
//   Step 5: Run the training loop        (Layer 5 - ml)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{dataset::TextDataset, source::CorpusFile};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::MetricsLogger,
    vocab_store::VocabStore,
};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved to disk and reloaded by the
// neighbours command. The #[derive(Serialize, Deserialize)] macros
// from serde handle reading/writing this struct to JSON automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub corpus_path:      String,
    pub checkpoint_dir:   String,
    pub vocab_size:       usize,
    pub embedding_dim:    usize,
    pub skip_window:      usize,
    pub num_skips:        usize,
    pub batch_size:       usize,
    pub steps:            usize,
    pub lr:               f64,
    pub seed:             u64,
    pub log_every:        usize,
    pub sample_every:     usize,
    pub checkpoint_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus_path:      "data/corpus.txt".to_string(),
            checkpoint_dir:   "checkpoints".to_string(),
            vocab_size:       50_000,
            embedding_dim:    128,
            skip_window:      1,
            num_skips:        2,
            batch_size:       128,
            steps:            100_000,
            lr:               1e-3,
            seed:             42,
            log_every:        2000,
            sample_every:     10_000,
            checkpoint_every: 10_000,
        }
    }
}

impl TrainConfig {
    /// Reject configurations that could never train.
    ///
    /// The batcher enforces its own sampling invariants too, but checking
    /// here means a bad flag combination fails before the corpus is
    /// scanned rather than after.
    pub fn validate(&self) -> Result<()> {
        if self.vocab_size == 0 {
            anyhow::bail!("vocab_size must be at least 1");
        }
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be at least 1");
        }
        if self.skip_window == 0 {
            anyhow::bail!("skip_window must be at least 1");
        }
        if self.num_skips == 0 || self.num_skips > 2 * self.skip_window {
            anyhow::bail!(
                "num_skips must be between 1 and 2 * skip_window ({}), got {}",
                2 * self.skip_window,
                self.num_skips,
            );
        }
        if self.log_every == 0 || self.sample_every == 0 || self.checkpoint_every == 0 {
            anyhow::bail!("log_every, sample_every and checkpoint_every must be non-zero");
        }
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Validate the configuration ────────────────────────────────
        cfg.validate()?;
        tracing::info!("Random seed set to: {}", cfg.seed);

        // ── Step 2 + 3: Scan the corpus twice ─────────────────────────────────
        // The first pass builds the bounded vocabulary, the second encodes
        // every token as its id. CorpusFile reopens the file per pass.
        let source  = CorpusFile::new(&cfg.corpus_path);
        let dataset = TextDataset::build(&source, cfg.vocab_size)?;
        tracing::info!("Loaded dataset from '{}'", cfg.corpus_path);
        tracing::info!(
            "Vocabulary: {} entries, corpus: {} tokens",
            dataset.vocabulary.len(),
            dataset.len(),
        );

        // A quick sanity log: the most frequent terms and a decoded sample
        let top: Vec<&String> = dataset.vocabulary.words().iter().take(5).collect();
        tracing::info!("Top 5 terms in vocabulary: {:?}", top);
        let sample = &dataset.data[..dataset.len().min(10)];
        tracing::info!(
            "Sample data: {:?} --> {}",
            sample,
            dataset.decode(sample).join(" "),
        );

        // ── Step 4: Persist vocabulary + config ───────────────────────────────
        // Both are needed later to rebuild the model for neighbour lookups
        VocabStore::new(&cfg.checkpoint_dir).save(&dataset.vocabulary)?;
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

        // ── Step 5: Run the training loop (Layer 5) ───────────────────────────
        run_training(cfg, &dataset, ckpt_manager, metrics)?;

        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_num_skips_must_fit_the_window() {
        let cfg = TrainConfig { skip_window: 1, num_skips: 3, ..Default::default() };
        assert!(cfg.validate().is_err());

        let cfg = TrainConfig { skip_window: 2, num_skips: 4, ..Default::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_parameters_are_rejected() {
        for cfg in [
            TrainConfig { vocab_size: 0, ..Default::default() },
            TrainConfig { batch_size: 0, ..Default::default() },
            TrainConfig { skip_window: 0, ..Default::default() },
            TrainConfig { num_skips: 0, ..Default::default() },
            TrainConfig { log_every: 0, ..Default::default() },
        ] {
            assert!(cfg.validate().is_err());
        }
    }
}
