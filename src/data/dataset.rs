use anyhow::Result;

use crate::data::encoder::encode_corpus;
use crate::data::vocab_builder::build_vocabulary;
use crate::domain::traits::TokenSource;
use crate::domain::vocabulary::Vocabulary;

/// The fully prepared training data: the corpus as an id sequence plus
/// the vocabulary that produced it.
pub struct TextDataset {
    /// The corpus with every token replaced by its vocabulary id,
    /// in original order
    pub data: Vec<i32>,

    /// The bounded token ↔ id mapping the corpus was encoded with
    pub vocabulary: Vocabulary,
}

impl TextDataset {
    /// Run both passes over `source`: build the vocabulary, then encode
    /// the corpus with it. Each pass gets its own scanner, so the second
    /// pass always starts at the first token.
    pub fn build(source: &dyn TokenSource, vocab_size: usize) -> Result<Self> {
        let vocabulary = build_vocabulary(source, vocab_size)?;
        if vocabulary.is_empty() {
            anyhow::bail!("Corpus contains no tokens");
        }
        let data = encode_corpus(source, &vocabulary)?;
        Ok(Self { data, vocabulary })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Map a slice of ids back to their tokens, for log output
    pub fn decode(&self, ids: &[i32]) -> Vec<&str> {
        ids.iter()
            .map(|&id| self.vocabulary.word(id).unwrap_or("?"))
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::TextSource;

    #[test]
    fn test_build_runs_both_passes() {
        let source  = TextSource::new("to be or not to be");
        let dataset = TextDataset::build(&source, 10).unwrap();

        assert_eq!(dataset.len(), 6);
        assert_eq!(dataset.len() as u64, dataset.vocabulary.total_tokens());
        // "to" and "be" (2 each) outrank "not" and "or" (1 each)
        assert!(dataset.vocabulary.id("to").unwrap() < dataset.vocabulary.id("not").unwrap());
    }

    #[test]
    fn test_decode_inverts_the_encoding() {
        let source  = TextSource::new("sun moon sun");
        let dataset = TextDataset::build(&source, 10).unwrap();

        assert_eq!(dataset.decode(&dataset.data), vec!["sun", "moon", "sun"]);
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let source = TextSource::new("   \n ");
        assert!(TextDataset::build(&source, 10).is_err());
    }
}
