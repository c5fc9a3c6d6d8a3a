//! The text normalization pipeline: tokenize, lowercase, filter, stem.
//!
//! The same [`Normalizer`] is used to prepare a corpus for indexing and to
//! normalize a query string before ranking, so that term lookups agree in
//! both directions. It is a pure function of its input plus the
//! read-only [`StopwordSet`] it was constructed with; it holds no other
//! state and cannot fail.

use std::sync::Arc;

use super::stemmer;
use super::stopwords::StopwordSet;

/// A normalized term: lowercase ASCII alphanumeric, stopword-filtered,
/// Porter-stemmed.
pub type Term = String;

/// Normalizes raw text into a sequence of [`Term`]s.
///
/// Construct once with a shared, read-only stopword set, then call
/// [`Normalizer::normalize_line`] for every line of input or query text.
#[derive(Clone)]
pub struct Normalizer {
    stopwords: Arc<StopwordSet>,
}

impl Normalizer {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self { stopwords }
    }

    /// Tokenize, lowercase, filter, and stem one line of raw text.
    ///
    /// Steps, in order:
    /// 1. Split on runs of characters outside `[a-zA-Z0-9]`.
    /// 2. ASCII-lowercase each token.
    /// 3. Drop tokens shorter than 2 characters.
    /// 4. Drop tokens in the stopword set.
    /// 5. Porter-stem the survivors.
    pub fn normalize_line(&self, raw: &str) -> Vec<Term> {
        raw.split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|tok| !tok.is_empty())
            .map(|tok| tok.to_ascii_lowercase())
            .filter(|tok| tok.chars().count() >= 2)
            .filter(|tok| !self.stopwords.contains(tok))
            .map(|tok| stemmer::stem(&tok))
            .collect()
    }
}
