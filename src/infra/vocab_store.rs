// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists the vocabulary next to the model checkpoints.
//
// The neighbours command needs the exact id → word table the
// model was trained with — rebuilding the vocabulary from the
// corpus would work, but any change to the corpus file between
// the two commands would silently shift every id. Writing the
// table out once and reading it back removes that hazard.
//
// The JSON layout is the vocabulary's id-ordered parts:
//   {
//     "words":        ["UNK", "the", "of", ...],
//     "counts":       [41824, 1061396, 593677, ...],
//     "sentinel":     true,
//     "total_tokens": 17005207
//   }

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::vocabulary::Vocabulary;

pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Write the vocabulary to `{dir}/vocabulary.json`
    pub fn save(&self, vocab: &Vocabulary) -> Result<()> {
        fs::create_dir_all(&self.dir).ok();
        let path = self.dir.join("vocabulary.json");

        let json = vocabulary_to_json(vocab);
        fs::write(&path, serde_json::to_string_pretty(&json)?)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;

        tracing::info!(
            "Vocabulary with {} entries saved to '{}'",
            vocab.len(),
            path.display()
        );
        Ok(())
    }

    /// Read the vocabulary back from `{dir}/vocabulary.json`
    pub fn load(&self) -> Result<Vocabulary> {
        let path = self.dir.join("vocabulary.json");

        let raw = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read vocabulary from '{}'. Have you run 'train' first?",
                    path.display()
                )
            })?;

        vocabulary_from_json(&serde_json::from_str(&raw)?)
    }
}

fn vocabulary_to_json(vocab: &Vocabulary) -> serde_json::Value {
    serde_json::json!({
        "words":        vocab.words(),
        "counts":       vocab.counts(),
        "sentinel":     vocab.has_sentinel(),
        "total_tokens": vocab.total_tokens(),
    })
}

fn vocabulary_from_json(value: &serde_json::Value) -> Result<Vocabulary> {
    let words: Vec<String> = serde_json::from_value(value["words"].clone())
        .context("Vocabulary file has no 'words' array")?;
    let counts: Vec<u64> = serde_json::from_value(value["counts"].clone())
        .context("Vocabulary file has no 'counts' array")?;

    if words.len() != counts.len() {
        anyhow::bail!(
            "Vocabulary file is corrupt: {} words but {} counts",
            words.len(),
            counts.len()
        );
    }

    let sentinel     = value["sentinel"].as_bool().unwrap_or(false);
    let total_tokens = value["total_tokens"].as_u64().unwrap_or(0);

    Ok(Vocabulary::from_parts(words, counts, sentinel, total_tokens))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocabulary::OUT_OF_VOCABULARY;

    #[test]
    fn test_json_round_trip() {
        let original = Vocabulary::from_parts(
            vec![OUT_OF_VOCABULARY.into(), "the".into(), "cat".into()],
            vec![7, 5, 2],
            true,
            14,
        );

        let restored = vocabulary_from_json(&vocabulary_to_json(&original)).unwrap();

        assert_eq!(restored.words(), original.words());
        assert_eq!(restored.counts(), original.counts());
        assert_eq!(restored.has_sentinel(), original.has_sentinel());
        assert_eq!(restored.total_tokens(), original.total_tokens());
        assert_eq!(restored.id("cat"), Some(2));
    }

    #[test]
    fn test_mismatched_tables_are_rejected() {
        let bad = serde_json::json!({
            "words":  ["a", "b"],
            "counts": [1],
        });
        assert!(vocabulary_from_json(&bad).is_err());
    }
}
