//! The posting and posting-list types at the heart of the inverted index.

/// The record of one term's occurrences within a single document.
///
/// Invariants:
/// - `term_freq == positions.len()`
/// - `positions` is strictly increasing.
///
/// Both invariants are enforced at construction: there is no way to build
/// a [`Posting`] that violates them from outside this module.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Posting {
    pub doc_id: u32,
    term_freq: u32,
    positions: Vec<u32>,
}

impl Posting {
    /// Create a posting with a single initial position.
    pub fn new(doc_id: u32, position: u32) -> Self {
        Self {
            doc_id,
            term_freq: 1,
            positions: vec![position],
        }
    }

    /// Append a new, strictly-greater position to this posting, bumping
    /// `term_freq` to match.
    ///
    /// # Panics
    ///
    /// Panics if `position` does not strictly increase over the last
    /// recorded position. This would indicate a bug in the caller (the
    /// Indexer and Shard Reader are the only callers, and both produce
    /// positions in increasing order by construction).
    pub fn push_position(&mut self, position: u32) {
        debug_assert!(
            self.positions.last().is_none_or(|&last| position > last),
            "positions must be strictly increasing"
        );
        self.positions.push(position);
        self.term_freq = self.positions.len() as u32;
    }

    /// Build a posting directly from a pre-sorted list of positions
    /// (used by the shard reader, which parses an already-ordered list).
    pub fn from_positions(doc_id: u32, positions: Vec<u32>) -> Self {
        let term_freq = positions.len() as u32;
        Self {
            doc_id,
            term_freq,
            positions,
        }
    }

    pub fn term_freq(&self) -> u32 {
        self.term_freq
    }

    pub fn positions(&self) -> &[u32] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_freq_tracks_position_count() {
        let mut p = Posting::new(1, 3);
        p.push_position(11);
        p.push_position(15);
        assert_eq!(p.term_freq(), 3);
        assert_eq!(p.positions(), &[3, 11, 15]);
    }

    #[test]
    fn from_positions_computes_term_freq() {
        let p = Posting::from_positions(2, vec![4, 6]);
        assert_eq!(p.term_freq(), 2);
    }
}
