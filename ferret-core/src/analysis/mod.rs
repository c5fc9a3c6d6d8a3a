//! Text analysis: tokenization, stopword filtering, and Porter stemming.
//!
//! This module is the one place index-time and query-time normalization
//! can diverge by accident, so it exposes exactly one entry point,
//! [`Normalizer`], and keeps its internals (the stemmer's suffix rules,
//! the stopword set's storage) private.

mod normalizer;
mod stemmer;
mod stopwords;

pub use normalizer::{Normalizer, Term};
pub use stopwords::StopwordSet;
