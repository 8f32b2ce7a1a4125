//! Corpus loading: a precomputed JSON array of sentences is tokenized into a
//! word → followers adjacency map, loaded once at startup and never mutated.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Corpus load failures.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("reading corpus from {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("parsing corpus from {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("corpus at {path} contains no usable sentences")]
    Empty { path: String },
}

/// Word-adjacency corpus: for each word, the words observed to follow it.
/// Keys are the known-word set used for prompt validation.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    followers: HashMap<String, Vec<String>>,
}

impl Corpus {
    /// Load from a JSON file containing an array of sentence strings.
    pub fn load(path: &Path) -> Result<Corpus, CorpusError> {
        let display = path.display().to_string();
        let s = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: display.clone(),
            source,
        })?;
        #[derive(Deserialize)]
        struct Lines(Vec<String>);
        let Lines(lines) = serde_json::from_str(&s).map_err(|source| CorpusError::Parse {
            path: display.clone(),
            source,
        })?;
        let corpus = Self::from_lines(lines.iter().map(String::as_str));
        if corpus.is_empty() {
            return Err(CorpusError::Empty { path: display });
        }
        log::info!("loaded corpus: {} word(s) from {}", corpus.len(), display);
        Ok(corpus)
    }

    /// Build the adjacency map from whitespace-tokenized sentences.
    /// Adjacency never crosses a sentence boundary.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Corpus {
        let mut followers: HashMap<String, Vec<String>> = HashMap::new();
        for line in lines {
            let words: Vec<&str> = line.split_whitespace().collect();
            for pair in words.windows(2) {
                followers
                    .entry(pair[0].to_string())
                    .or_default()
                    .push(pair[1].to_string());
            }
            // Terminal words still become keys so single-sentence-final
            // prompts validate as known.
            if let Some(last) = words.last() {
                followers.entry(last.to_string()).or_default();
            }
        }
        Corpus { followers }
    }

    /// True when the word appears as a key (i.e. was seen in the corpus).
    pub fn contains(&self, word: &str) -> bool {
        self.followers.contains_key(word)
    }

    /// Words observed to follow `word`. Empty slice for terminal or unknown words.
    pub fn followers(&self, word: &str) -> &[String] {
        self.followers
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All known words.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.followers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.followers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.followers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_builds_adjacency() {
        let corpus = Corpus::from_lines(["the cat sat", "the dog ran"]);
        assert!(corpus.contains("the"));
        assert!(corpus.contains("cat"));
        assert!(corpus.contains("ran"));
        assert!(!corpus.contains("bird"));
        let mut next: Vec<&str> = corpus.followers("the").iter().map(String::as_str).collect();
        next.sort();
        assert_eq!(next, ["cat", "dog"]);
        assert!(corpus.followers("ran").is_empty());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let corpus = Corpus::from_lines(["", "  ", "one two"]);
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn load_rejects_empty_corpus() {
        let dir = std::env::temp_dir().join(format!("babble-corpus-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("empty.json");
        std::fs::write(&path, "[]").expect("write corpus");
        let err = Corpus::load(&path).expect_err("empty corpus must fail");
        assert!(matches!(err, CorpusError::Empty { .. }));
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = std::env::temp_dir().join(format!("babble-corpus-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("bad.json");
        std::fs::write(&path, "{not json").expect("write corpus");
        let err = Corpus::load(&path).expect_err("bad json must fail");
        assert!(matches!(err, CorpusError::Parse { .. }));
    }
}
