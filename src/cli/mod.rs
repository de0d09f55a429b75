// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`     — trains skip-gram embeddings on a corpus
//   2. `neighbors` — loads a checkpoint and prints the nearest
//                    neighbours of chosen words
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs, NeighborsArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "word2vec",
    version = "0.1.0",
    about = "Train word2vec skip-gram embeddings on a text corpus, then explore nearest neighbours."
)]
pub struct Cli {
    /// The subcommand to run (train or neighbors)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)     => Self::run_train(args),
            Commands::Neighbors(args) => Self::run_neighbors(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on corpus: {}", args.corpus);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    /// Handles the `neighbors` subcommand.
    /// Loads the model from checkpoint and prints similar words.
    fn run_neighbors(args: NeighborsArgs) -> Result<()> {
        use crate::application::neighbors_use_case::NeighborsUseCase;

        let use_case = NeighborsUseCase::new(args.checkpoint_dir.clone())?;
        use_case.print_neighbors(&args.words, args.top_k)?;
        Ok(())
    }
}
