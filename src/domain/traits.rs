// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - CorpusFile implements TokenSource
//   - TextSource (in-memory) also implements TokenSource
//   - The data layer only sees TokenSource and works with
//     both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;

// ─── TokenSource ──────────────────────────────────────────────────────────────
/// Any component that can provide a whitespace-delimited token stream.
///
/// The vocabulary builder and the corpus encoder each need their own pass
/// over the full stream, so a TokenSource hands out a *fresh* TokenStream
/// per call to `scan()` — there is no shared file position to rewind, and
/// no way to accidentally start the second pass halfway through the input.
///
/// Implementations:
///   - CorpusFile  → reopens a text file for every pass
///   - TextSource  → reads from an in-memory string (tests, demos)
pub trait TokenSource {
    /// Begin a new pass over the stream, starting at the first token.
    fn scan(&self) -> Result<Box<dyn TokenStream + '_>>;
}

// ─── TokenStream ──────────────────────────────────────────────────────────────
/// One pass over a token stream.
///
/// `next_token` returns `Ok(Some(token))` until the stream is exhausted,
/// then `Ok(None)`. A read failure aborts the pass with an error — callers
/// must not use any tokens collected so far.
pub trait TokenStream {
    fn next_token(&mut self) -> Result<Option<String>>;
}
