// ============================================================
// Layer 4 — Token Sources
// ============================================================
// Implements the TokenSource trait from Layer 3 for the two
// places a corpus can live: a text file on disk, or an
// in-memory string (used by unit tests and demos).
//
// A token is a maximal run of non-whitespace characters;
// tokens are separated by runs of whitespace of any kind.
// There is no other file-format contract.
//
// The pipeline scans the corpus twice (once to count, once to
// encode), so every call to scan() starts a brand-new pass.
// For CorpusFile that means reopening the file — two passes
// never share a file handle or a read position.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::PathBuf,
};

use crate::domain::traits::{TokenSource, TokenStream};

// ─── TokenScanner ─────────────────────────────────────────────────────────────
/// Splits a buffered reader into whitespace-delimited tokens, one line
/// at a time. Tokens from the current line are queued so `next_token`
/// stays cheap between reads.
pub struct TokenScanner<R> {
    reader:  R,
    pending: VecDeque<String>,
    line:    String,
}

impl<R: BufRead> TokenScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line:    String::new(),
        }
    }
}

impl<R: BufRead> TokenStream for TokenScanner<R> {
    fn next_token(&mut self) -> Result<Option<String>> {
        // Refill the queue from the next non-blank line
        while self.pending.is_empty() {
            self.line.clear();
            let bytes_read = self
                .reader
                .read_line(&mut self.line)
                .context("Failed to read from token stream")?;
            if bytes_read == 0 {
                // End of stream
                return Ok(None);
            }
            self.pending
                .extend(self.line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

// ─── CorpusFile ───────────────────────────────────────────────────────────────
/// A plain-text corpus file on disk.
/// Each scan() reopens the file, so passes are independent.
pub struct CorpusFile {
    path: PathBuf,
}

impl CorpusFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: PathBuf::from(path.into()) }
    }
}

impl TokenSource for CorpusFile {
    fn scan(&self) -> Result<Box<dyn TokenStream + '_>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open corpus file '{}'", self.path.display()))?;
        Ok(Box::new(TokenScanner::new(BufReader::new(file))))
    }
}

// ─── TextSource ───────────────────────────────────────────────────────────────
/// An in-memory corpus. Used by unit tests so the data layer can be
/// exercised without touching the filesystem.
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TokenSource for TextSource {
    fn scan(&self) -> Result<Box<dyn TokenStream + '_>> {
        Ok(Box::new(TokenScanner::new(Cursor::new(self.text.as_bytes()))))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn collect(source: &dyn TokenSource) -> Vec<String> {
        let mut stream = source.scan().unwrap();
        let mut tokens = Vec::new();
        while let Some(t) = stream.next_token().unwrap() {
            tokens.push(t);
        }
        tokens
    }

    #[test]
    fn test_splits_on_runs_of_whitespace() {
        let source = TextSource::new("the   quick\t\tbrown\n\n fox");
        assert_eq!(collect(&source), vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn test_scan_restarts_from_the_beginning() {
        let source = TextSource::new("a b c");
        // Two passes over the same source must see identical streams
        assert_eq!(collect(&source), collect(&source));
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        let source = TextSource::new("  \n \t ");
        assert!(collect(&source).is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let source = CorpusFile::new("does/not/exist.txt");
        assert!(source.scan().is_err());
    }
}
