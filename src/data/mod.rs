// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw corpus file
// all the way to (center, context) training batches.
//
// The pipeline flows in this order:
//
//   corpus.txt
//       │
//       ▼
//   CorpusFile         → hands out a fresh token pass per scan
//       │
//       ▼
//   build_vocabulary   → frequency count + bounded top-S selection
//       │
//       ▼
//   encode_corpus      → second pass, token → integer id
//       │
//       ▼
//   TextDataset        → encoded corpus + its vocabulary
//       │
//       ▼
//   SkipGramBatcher    → sliding windows → (center, context) pairs
//       │
//       ▼
//   training loop      → feeds batches to the embedding engine
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Mikolov et al. (2013) word2vec paper

/// File-backed and in-memory token sources
pub mod source;

/// Builds the frequency-ranked, size-bounded vocabulary
pub mod vocab_builder;

/// Replaces each corpus token with its vocabulary id
pub mod encoder;

/// The encoded corpus together with its vocabulary
pub mod dataset;

/// Produces (center, context) skip-gram training batches
pub mod batcher;
