//! The Indexer: walks a directory of pre-normalized text files and
//! produces an in-memory positional inverted index.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::inverted::{DocId, DocumentTable, InvertedIndex};

/// Walk `folder` recursively, collect all regular `.txt` files, sort them
/// by full path, and build a positional inverted index plus the document
/// table that assigns their `doc_id`s.
///
/// The input files are assumed to already be normalized text (one term
/// per whitespace/non-alphanumeric-delimited run, lowercase, stemmed): the
/// Indexer itself does not re-stem or re-filter stopwords, it only splits
/// and counts.
pub fn build_index(folder: &Path) -> Result<(InvertedIndex, DocumentTable)> {
    if !folder.is_dir() {
        return Err(Error::Config(format!(
            "{} is not a directory",
            folder.display()
        )));
    }

    let mut files = collect_txt_files(folder)?;
    files.sort();

    if files.is_empty() {
        return Err(Error::EmptyCorpus(folder.to_path_buf()));
    }

    let mut index = InvertedIndex::new();
    let mut doc_table = DocumentTable::new();

    for path in files {
        let doc_id = (doc_table.len() + 1) as DocId;
        let term_count = index_file(&path, doc_id, &mut index)?;
        log::debug!(
            "indexed doc {doc_id} ({} terms): {}",
            term_count,
            path.display()
        );
        doc_table.push(path);
    }

    log::info!(
        "built index over {} documents, {} distinct terms",
        doc_table.len(),
        index.term_count()
    );

    Ok((index, doc_table))
}

/// Recursively collect every regular file under `folder` whose name ends
/// in `.txt`.
fn collect_txt_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut stack = vec![folder.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                stack.push(path);
            } else if file_type.is_file()
                && path.extension().is_some_and(|ext| ext == "txt")
            {
                out.push(path);
            }
        }
    }

    Ok(out)
}

/// Read `path` line by line, split each (already-lowercased) line on runs
/// of non-`[a-z0-9]` characters, and record every emitted term at the next
/// position. Returns the number of terms emitted (for logging).
fn index_file(path: &Path, doc_id: DocId, index: &mut InvertedIndex) -> Result<usize> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut position: u32 = 0;
    let mut term_count = 0usize;

    for line in reader.lines() {
        let line = line?;
        let lowered = line.to_ascii_lowercase();
        for token in lowered.split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit())) {
            if token.is_empty() {
                continue;
            }
            position += 1;
            term_count += 1;
            index.record(token.to_string(), doc_id, position);
        }
    }

    Ok(term_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn missing_directory_is_config_error() {
        let err = build_index(Path::new("/does/not/exist")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_directory_is_empty_corpus_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = build_index(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus(_)));
    }

    #[test]
    fn non_txt_files_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "notes.md", "market share");
        let err = build_index(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus(_)));
    }

    #[test]
    fn assigns_doc_ids_by_sorted_path() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "b.txt", "beta");
        write(tmp.path(), "a.txt", "alpha");

        let (_, doc_table) = build_index(tmp.path()).unwrap();
        assert_eq!(doc_table.path(1).unwrap().file_name().unwrap(), "a.txt");
        assert_eq!(doc_table.path(2).unwrap().file_name().unwrap(), "b.txt");
    }

    #[test]
    fn s2_positional_indexing() {
        let tmp = tempfile::tempdir().unwrap();
        let doc1 = "document describ market strategi carri compani agricultur chemic report predict market share chemic report market statist agrochem pesticid herbicid fungicid insecticid fertil predict sale market share stimul demand price cut volum sale";
        let doc2 = "document predict sale market share demand price cut";
        write(tmp.path(), "doc1.txt", doc1);
        write(tmp.path(), "doc2.txt", doc2);

        let (index, _) = build_index(tmp.path()).unwrap();

        // doc1 contains four occurrences of "market" at word positions
        // 3, 11, 15, and 25, matching term_freq 4 and the invariant that
        // term_freq equals the number of recorded positions.
        let market = index.postings("market").unwrap();
        assert_eq!(market[0].doc_id, 1);
        assert_eq!(market[0].term_freq(), 4);
        assert_eq!(market[0].positions(), &[3, 11, 15, 25]);
        assert_eq!(market[1].doc_id, 2);
        assert_eq!(market[1].term_freq(), 1);
        assert_eq!(market[1].positions(), &[4]);

        let predict = index.postings("predict").unwrap();
        assert_eq!(predict[0].positions(), &[10, 23]);
        assert_eq!(predict[1].positions(), &[2]);

        let document = index.postings("document").unwrap();
        assert_eq!(document[0].positions(), &[1]);
        assert_eq!(document[1].positions(), &[1]);
    }
}
