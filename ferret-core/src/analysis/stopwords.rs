//! The stopword set used by the normalizer.
//!
//! The stopword set is owned by the [`super::Normalizer`] that uses it
//! rather than living behind a mutable global. It is built once and
//! never mutated afterward.

use std::collections::HashSet;
use std::path::Path;

/// A read-only set of stopwords, already lowercased and deduplicated.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// An empty stopword set (nothing is filtered).
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Build a stopword set directly from an iterator of words. Each word
    /// is lowercased; duplicates collapse naturally via the backing set.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_ascii_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a stopword set from a file: one stopword per line, trimmed,
    /// lowercased, deduplicated. A missing file is not an error; it
    /// produces an empty set and a warning.
    pub fn from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_words(contents.lines()),
            Err(err) => {
                log::warn!(
                    "stopword file {} not found ({err}); proceeding with an empty stopword set",
                    path.display()
                );
                Self::empty()
            }
        }
    }

    /// Whether `word` (expected already lowercased) is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupes_and_lowercases() {
        let set = StopwordSet::from_words(["The", " the ", "AND", "and"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("the"));
        assert!(set.contains("and"));
    }

    #[test]
    fn missing_file_is_empty_not_error() {
        let set = StopwordSet::from_file(Path::new("/nonexistent/path/stopwords.txt"));
        assert!(set.is_empty());
    }
}
