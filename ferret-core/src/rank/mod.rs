//! Term-at-a-time ranking: log-weighted tf-idf cosine similarity combined
//! with a positional proximity bonus.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::index::{DocId, DocumentTable, InvertedIndex, Posting};

/// Scores documents against a query over a borrowed, immutable index.
///
/// Holds only shared references, so a single `Ranker` may be used
/// concurrently from multiple threads against a loaded index without
/// synchronization.
pub struct Ranker<'a> {
    index: &'a InvertedIndex,
    doc_table: &'a DocumentTable,
}

impl<'a> Ranker<'a> {
    pub fn new(index: &'a InvertedIndex, doc_table: &'a DocumentTable) -> Self {
        Self { index, doc_table }
    }

    /// Score every document containing at least one of `query_terms`
    /// against the query, combining cosine similarity and proximity.
    ///
    /// Terms not present in the index are skipped without error; an
    /// empty or entirely-absent query yields an empty mapping.
    pub fn rank(&self, query_terms: &[String]) -> BTreeMap<DocId, f64> {
        let n = self.doc_table.len();
        if n == 0 || query_terms.is_empty() {
            return BTreeMap::new();
        }

        let query_freq = term_counts(query_terms);
        let idf = self.idf_table(query_freq.keys());
        if idf.is_empty() {
            return BTreeMap::new();
        }

        let mut scores = self.cosine_scores(&query_freq, &idf);
        self.add_proximity(query_terms, &mut scores);
        scores
    }

    /// `idf(t) = log10(N / df(t))` for every query term present in the
    /// index. Terms with no postings are omitted.
    fn idf_table<'q, I>(&self, terms: I) -> BTreeMap<&'q str, f64>
    where
        I: IntoIterator<Item = &'q String>,
    {
        let n = self.doc_table.len() as f64;
        terms
            .into_iter()
            .filter_map(|t| {
                let df = self.index.doc_freq(t);
                if df == 0 {
                    None
                } else {
                    Some((t.as_str(), (n / df as f64).log10()))
                }
            })
            .collect()
    }

    fn cosine_scores(
        &self,
        query_freq: &BTreeMap<&str, u32>,
        idf: &BTreeMap<&str, f64>,
    ) -> BTreeMap<DocId, f64> {
        let query_weights: BTreeMap<&str, f64> = query_freq
            .iter()
            .filter_map(|(t, qf)| idf.get(t).map(|idf_t| (*t, tf_idf_weight(*qf, *idf_t))))
            .collect();
        let query_norm = euclidean_norm(query_weights.values().copied());
        if query_norm == 0.0 {
            return BTreeMap::new();
        }

        // doc_id -> (dot product accumulator, squared-weight accumulator)
        let mut doc_acc: BTreeMap<DocId, (f64, f64)> = BTreeMap::new();

        for (term, qw) in &query_weights {
            let Some(idf_t) = idf.get(term) else { continue };
            let Some(postings) = self.index.postings(term) else {
                continue;
            };
            for posting in postings {
                let dw = tf_idf_weight(posting.term_freq(), *idf_t);
                let entry = doc_acc.entry(posting.doc_id).or_insert((0.0, 0.0));
                entry.0 += dw * qw;
                entry.1 += dw * dw;
            }
        }

        doc_acc
            .into_iter()
            .filter_map(|(doc_id, (dot, sum_sq))| {
                let doc_norm = sum_sq.sqrt();
                if doc_norm == 0.0 {
                    None
                } else {
                    Some((doc_id, dot / (doc_norm * query_norm)))
                }
            })
            .collect()
    }

    /// Add the averaged proximity bonus for each adjacent query-term pair
    /// directly into `scores`, inserting new documents as needed so that a
    /// document can outrank purely on proximity ties even when its cosine
    /// contribution alone was already present.
    fn add_proximity(&self, query_terms: &[String], scores: &mut BTreeMap<DocId, f64>) {
        if query_terms.len() < 2 {
            return;
        }

        let pair_count = query_terms.len() - 1;
        let mut raw: BTreeMap<DocId, f64> = BTreeMap::new();

        for pair in query_terms.windows(2) {
            let (left, right) = (pair[0].as_str(), pair[1].as_str());
            let Some(left_postings) = self.index.postings(left) else {
                continue;
            };
            let Some(right_postings) = self.index.postings(right) else {
                continue;
            };

            for doc_id in shared_doc_ids(left_postings, right_postings) {
                let left_positions = positions_for(left_postings, doc_id);
                let right_positions = positions_for(right_postings, doc_id);
                if let Some(distance) = shortest_distance(left_positions, right_positions) {
                    if distance > 0 {
                        *raw.entry(doc_id).or_insert(0.0) += 1.0 / distance as f64;
                    }
                }
            }
        }

        for (doc_id, total) in raw {
            *scores.entry(doc_id).or_insert(0.0) += total / pair_count as f64;
        }
    }
}

fn term_counts(terms: &[String]) -> BTreeMap<&str, u32> {
    let mut counts = BTreeMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    counts
}

fn tf_idf_weight(term_freq: u32, idf: f64) -> f64 {
    (1.0 + (term_freq as f64).log10()) * idf
}

fn euclidean_norm<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().map(|v| v * v).sum::<f64>().sqrt()
}

fn shared_doc_ids(left: &[Posting], right: &[Posting]) -> Vec<DocId> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].doc_id.cmp(&right[j].doc_id) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(left[i].doc_id);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

fn positions_for<'p>(postings: &'p [Posting], doc_id: DocId) -> &'p [u32] {
    postings
        .iter()
        .find(|p| p.doc_id == doc_id)
        .map(Posting::positions)
        .unwrap_or(&[])
}

/// Two-pointer sweep over two sorted position lists; returns the smallest
/// absolute distance between any pair of positions, or `None` if either
/// list is empty.
fn shortest_distance(a: &[u32], b: &[u32]) -> Option<u32> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let (mut i, mut j) = (0, 0);
    let mut best: Option<u32> = None;
    while i < a.len() && j < b.len() {
        let dist = a[i].abs_diff(b[j]);
        best = Some(best.map_or(dist, |b| b.min(dist)));
        if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    best
}

/// Sort `scores` descending and resolve the top `n` documents to their
/// display paths. The one piece of presentation logic that lives in the
/// core, since it is pure and shared by every caller.
pub fn top_n(scores: &BTreeMap<DocId, f64>, doc_table: &DocumentTable, n: usize) -> Vec<(PathBuf, f64)> {
    let mut ranked: Vec<(DocId, f64)> = scores.iter().map(|(&id, &score)| (id, score)).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(n)
        .filter_map(|(doc_id, score)| doc_table.path(doc_id).map(|p| (p.to_path_buf(), score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use std::fs;

    fn corpus(files: &[(&str, &str)]) -> (InvertedIndex, DocumentTable, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            fs::write(tmp.path().join(name), contents).unwrap();
        }
        let (index, doc_table) = build_index(tmp.path()).unwrap();
        (index, doc_table, tmp)
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn s4_cosine_ranking() {
        let doc1 = "document describ market strategi carri compani agricultur chemic report predict market share chemic report market statist agrochem pesticid herbicid fungicid insecticid fertil predict sale market share stimul demand price cut volum sale";
        let doc2 = "document predict sale market share demand price cut";
        let (index, doc_table, _tmp) =
            corpus(&[("doc1.txt", doc1), ("doc2.txt", doc2)]);

        let ranker = Ranker::new(&index, &doc_table);
        let scores = ranker.rank(&terms(&["market", "share"]));

        let score1 = scores[&1];
        let score2 = scores[&2];
        assert!(score1 > 0.0);
        assert!(score2 > 0.0);
        assert!(score2 > score1, "doc2 ({score2}) should outrank doc1 ({score1})");
    }

    #[test]
    fn s5_proximity_tie_break() {
        let (index, doc_table, _tmp) = corpus(&[
            ("d1.txt", "alpha beta"),
            ("d2.txt", "alpha gamma beta"),
        ]);

        let ranker = Ranker::new(&index, &doc_table);
        let scores = ranker.rank(&terms(&["alpha", "beta"]));

        assert!(scores[&1] > scores[&2]);
    }

    #[test]
    fn s6_absent_query_term_is_dropped_without_error() {
        let doc1 = "document describ market strategi carri compani agricultur chemic report predict market share chemic report market statist agrochem pesticid herbicid fungicid insecticid fertil predict sale market share stimul demand price cut volum sale";
        let doc2 = "document predict sale market share demand price cut";
        let (index, doc_table, _tmp) =
            corpus(&[("doc1.txt", doc1), ("doc2.txt", doc2)]);

        let ranker = Ranker::new(&index, &doc_table);
        let with_junk = ranker.rank(&terms(&["market", "xyzzyx"]));
        let without_junk = ranker.rank(&terms(&["market"]));

        assert_eq!(with_junk, without_junk);
    }

    #[test]
    fn empty_query_yields_empty_scores() {
        let (index, doc_table, _tmp) = corpus(&[("a.txt", "alpha beta")]);
        let ranker = Ranker::new(&index, &doc_table);
        assert!(ranker.rank(&[]).is_empty());
    }

    #[test]
    fn top_n_sorts_descending_and_resolves_paths() {
        let mut scores = BTreeMap::new();
        scores.insert(1u32, 0.5);
        scores.insert(2u32, 0.9);
        let mut table = DocumentTable::new();
        table.push(PathBuf::from("a.txt"));
        table.push(PathBuf::from("b.txt"));

        let top = top_n(&scores, &table, 10);
        assert_eq!(top[0], (PathBuf::from("b.txt"), 0.9));
        assert_eq!(top[1], (PathBuf::from("a.txt"), 0.5));
    }
}
