// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `neighbors`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train skip-gram embeddings on a plain-text corpus
    Train(TrainArgs),

    /// Print nearest neighbours of words using a trained checkpoint
    Neighbors(NeighborsArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to the training corpus — plain text, tokens separated
    /// by runs of whitespace
    #[arg(long)]
    pub corpus: String,

    /// Directory to save model checkpoints, config and vocabulary
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Maximum number of ids in the vocabulary; when the corpus has
    /// more distinct tokens, one slot becomes the UNK bucket
    #[arg(long, default_value_t = 50_000)]
    pub vocab_size: usize,

    /// Dimension of the embedding vector learned per word
    #[arg(long, default_value_t = 128)]
    pub embedding_dim: usize,

    /// Context words considered on each side of a center word
    #[arg(long, default_value_t = 1)]
    pub skip_window: usize,

    /// (center, context) pairs generated per window;
    /// must not exceed 2 * skip_window
    #[arg(long, default_value_t = 2)]
    pub num_skips: usize,

    /// Training pairs processed together in one step
    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    /// Number of steps to train for
    #[arg(long, default_value_t = 100_000)]
    pub steps: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Random seed for the batcher and the neighbour sampling;
    /// omit for a fresh seed per run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report the average loss every this many steps
    #[arg(long, default_value_t = 2000)]
    pub log_every: usize,

    /// Print sample nearest neighbours every this many steps
    #[arg(long, default_value_t = 10_000)]
    pub sample_every: usize,

    /// Save a checkpoint every this many steps
    #[arg(long, default_value_t = 10_000)]
    pub checkpoint_every: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            corpus_path:      a.corpus,
            checkpoint_dir:   a.checkpoint_dir,
            vocab_size:       a.vocab_size,
            embedding_dim:    a.embedding_dim,
            skip_window:      a.skip_window,
            num_skips:        a.num_skips,
            batch_size:       a.batch_size,
            steps:            a.steps,
            lr:               a.lr,
            seed:             a.seed.unwrap_or_else(rand::random),
            log_every:        a.log_every,
            sample_every:     a.sample_every,
            checkpoint_every: a.checkpoint_every,
        }
    }
}

/// All arguments for the `neighbors` command
#[derive(Args, Debug)]
pub struct NeighborsArgs {
    /// Words to look up (repeat the flag for several words);
    /// with none given, a random sample of frequent words is shown
    #[arg(long = "word")]
    pub words: Vec<String>,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Number of neighbours to print per word
    #[arg(long, default_value_t = 8)]
    pub top_k: usize,
}
