// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   checkpoint.rs  — Saving and loading model weights
//                    Uses Burn's CompactRecorder to serialise
//                    model parameters to disk. Also saves/loads
//                    TrainConfig as JSON so the neighbours
//                    command can rebuild the model.
//
//   vocab_store.rs — Vocabulary persistence
//                    Writes the token ↔ id mapping (with its
//                    frequencies) to JSON after training, and
//                    reads it back for neighbour lookups.
//                    Ensures the same vocabulary is used for
//                    training and inference.
//
//   metrics.rs     — Training metrics logging
//                    Writes per-interval metrics (step, average
//                    loss) to a CSV file for later analysis
//                    and plotting.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap file checkpoints for S3 cloud storage)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Vocabulary saving and loading
pub mod vocab_store;

/// Training metrics CSV logger
pub mod metrics;
