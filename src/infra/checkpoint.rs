// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// What gets saved per checkpoint:
//   1. Model weights (.mpk.gz file) — all learned parameters
//   2. latest_step.json             — which step was last saved
//   3. train_config.json            — the training configuration
//
// Why save the config separately?
//   When loading for neighbour lookups, we need to know the
//   exact model shape (embedding dimension) to rebuild the
//   model before loading the weights into it.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip for smaller file size
//   - Type-safe: loading fails if the shape doesn't match
//
// File naming convention:
//   checkpoints/
//     model_step_10000.mpk.gz  ← weights after 10000 steps
//     model_step_20000.mpk.gz  ← weights after 20000 steps
//     ...
//     latest_step.json         ← contains the latest step number
//     train_config.json        ← training hyperparameters
//     vocabulary.json          ← written by the vocab store
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use serde_json;

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::SkipGramModel;

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    /// Path to the directory where checkpoints are stored
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save model weights for a given training step.
    pub fn save_model<B: AutodiffBackend>(
        &self,
        model: &SkipGramModel<B>,
        step:  usize,
    ) -> Result<()> {
        // Build the file path (without extension — recorder adds it)
        let path = self.dir.join(format!("model_step_{step}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        // Update the latest step pointer so loading knows which file to use
        let latest_path = self.dir.join("latest_step.json");
        fs::write(&latest_path, serde_json::to_string(&step)?)
            .with_context(|| "Failed to write latest_step.json")?;

        tracing::debug!("Saved checkpoint: step {}", step);
        Ok(())
    }

    /// Load model weights from the latest saved checkpoint.
    ///
    /// The model parameter must have the correct shape (matching the
    /// saved checkpoint) or loading will fail.
    pub fn load_model<B: Backend>(
        &self,
        model:  SkipGramModel<B>,
        device: &B::Device,
    ) -> Result<SkipGramModel<B>> {
        let step = self.latest_step()?;
        let path = self.dir.join(format!("model_step_{step}"));

        tracing::info!("Loading checkpoint from step {}", step);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display()
                )
            })?;

        // load_record() returns a new model with the loaded weights
        Ok(model.load_record(record))
    }

    /// Save the training configuration to JSON.
    ///
    /// This must be called before training starts so the neighbours
    /// command can reconstruct the exact model shape.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration from JSON.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' before 'neighbors'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Read latest_step.json and return the step number.
    /// Returns an error if training hasn't been run yet.
    fn latest_step(&self) -> Result<usize> {
        let path = self.dir.join("latest_step.json");

        let s = fs::read_to_string(&path)
            .with_context(|| {
                "Cannot find 'latest_step.json'. Have you run 'train' first?"
            })?;

        Ok(serde_json::from_str::<usize>(&s)?)
    }
}
