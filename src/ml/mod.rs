// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// (plus the checkpoint manager, which stores Burn records).
//
// Why isolate Burn code here?
//   - If Burn's API changes, we only update this layer
//   - Other layers are testable without a GPU
//   - The data pipeline only ever hands over two plain
//     Vec<i32>s per step; what the engine does with them
//     is invisible from the outside
//
// What's in this layer:
//
//   model.rs     — The skip-gram embedding model
//                  An input embedding table plus a bias-free
//                  projection back onto the vocabulary, trained
//                  with cross-entropy against the context word
//
//   trainer.rs   — The step-based training loop
//                  Feeds batches to the model, accumulates and
//                  reports average loss, periodically prints
//                  nearest neighbours and saves checkpoints
//
//   neighbors.rs — Cosine-similarity neighbour lookup over the
//                  normalized embedding rows
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Mikolov et al. (2013) word2vec

/// Skip-gram embedding model architecture
pub mod model;

/// Step-based training loop with periodic sampling and checkpointing
pub mod trainer;

/// Nearest-neighbour lookup over trained embeddings
pub mod neighbors;
