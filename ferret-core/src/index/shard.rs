//! Sharded on-disk persistence for the inverted index.
//!
//! The writer hash-partitions terms across `N` shard files and writes one
//! line per term in lexicographic order; the reader glob-matches every
//! `shard-*` file in a directory and rebuilds an equivalent in-memory
//! index without caring which shard a term landed in or what order the
//! shards were written.
//!
//! Alongside the shards, the writer persists the document table (`doc_id`
//! order -> display path) as `doc_table.txt`, one path per line, so a
//! query-side process can resolve result paths without re-walking the
//! original corpus directory.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::inverted::{DocumentTable, InvertedIndex};
use super::posting::Posting;

const DOC_TABLE_FILE: &str = "doc_table.txt";

/// Configuration for a shard-write operation.
#[derive(Debug, Clone)]
pub struct ShardWriterConfig {
    pub index_dir: PathBuf,
    pub num_shards: u32,
}

impl ShardWriterConfig {
    pub fn new(index_dir: impl Into<PathBuf>, num_shards: u32) -> Self {
        Self {
            index_dir: index_dir.into(),
            num_shards,
        }
    }
}

/// FNV-1a, 64-bit: the deterministic string hash used for shard
/// assignment. The reader never recomputes shard assignment, so any
/// stable hash works; this one is picked and documented here rather
/// than left to the platform's default hasher.
fn fnv1a_64(s: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for byte in s.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

fn shard_id(term: &str, num_shards: u32) -> u32 {
    (fnv1a_64(term) % num_shards as u64) as u32
}

fn shard_path(index_dir: &Path, i: u32) -> PathBuf {
    index_dir.join(format!("shard-{i}.txt"))
}

/// Write `index` to `config.num_shards` shard files under
/// `config.index_dir`, creating the directory if absent. Terms are
/// visited in lexicographic order (guaranteed by [`InvertedIndex`]'s
/// `BTreeMap` backing) so that repeated builds over the same corpus
/// produce byte-identical shards.
pub fn write_shards(index: &InvertedIndex, config: &ShardWriterConfig) -> Result<()> {
    if config.num_shards == 0 {
        return Err(Error::Config("num_shards must be positive".to_string()));
    }

    fs::create_dir_all(&config.index_dir)?;

    let mut writers: Vec<BufWriter<File>> = (0..config.num_shards)
        .map(|i| Ok(BufWriter::new(File::create(shard_path(&config.index_dir, i))?)))
        .collect::<Result<_>>()?;

    let mut term_count = 0usize;
    for (term, postings) in index.iter() {
        let id = shard_id(term, config.num_shards) as usize;
        writeln!(writers[id], "{}", format_line(term, postings))?;
        term_count += 1;
    }

    for mut w in writers {
        w.flush()?;
    }

    log::info!(
        "wrote {term_count} terms across {} shards to {}",
        config.num_shards,
        config.index_dir.display()
    );

    Ok(())
}

/// Persist the document table as `doc_table.txt`, one display path per
/// line, in ascending `doc_id` order.
pub fn write_doc_table(doc_table: &DocumentTable, index_dir: &Path) -> Result<()> {
    fs::create_dir_all(index_dir)?;
    let mut writer = BufWriter::new(File::create(index_dir.join(DOC_TABLE_FILE))?);
    for (_, path) in doc_table.iter() {
        writeln!(writer, "{}", path.display())?;
    }
    writer.flush()?;
    Ok(())
}

/// Read back the document table written by [`write_doc_table`].
pub fn read_doc_table(index_dir: &Path) -> Result<DocumentTable> {
    let file = File::open(index_dir.join(DOC_TABLE_FILE))?;
    let mut table = DocumentTable::new();
    for line in BufReader::new(file).lines() {
        table.push(PathBuf::from(line?));
    }
    Ok(table)
}

fn format_line(term: &str, postings: &[Posting]) -> String {
    let postings_str = postings
        .iter()
        .map(|p| {
            let positions = p
                .positions()
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!("{}:{}:{}", p.doc_id, p.term_freq(), positions)
        })
        .collect::<Vec<_>>()
        .join(";");
    format!("{term} {postings_str}")
}

/// Load every `shard-*` file in `index_dir` into a fresh [`InvertedIndex`].
///
/// Lines without a space separator are skipped (malformed shard grammar
/// with no discoverable term); a line that has a space but malformed
/// postings is a fatal parse error, aborting the whole load.
pub fn read_shards(index_dir: &Path) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new();

    let mut shard_files: Vec<PathBuf> = fs::read_dir(index_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("shard-"))
        })
        .collect();
    shard_files.sort();

    log::debug!(
        "loading {} shard file(s) from {}",
        shard_files.len(),
        index_dir.display()
    );

    for path in &shard_files {
        let file = File::open(path)?;
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let Some((term, rest)) = line.split_once(' ') else {
                continue;
            };
            let postings = parse_postings(path, rest, &line)?;
            index.insert_posting_list(term.to_string(), postings);
        }
    }

    log::info!(
        "loaded {} terms from {} shard file(s) in {}",
        index.term_count(),
        shard_files.len(),
        index_dir.display()
    );

    Ok(index)
}

fn parse_postings(path: &Path, rest: &str, full_line: &str) -> Result<Vec<Posting>> {
    rest.split(';').map(|p| parse_posting(path, p, full_line)).collect()
}

fn parse_posting(path: &Path, raw: &str, full_line: &str) -> Result<Posting> {
    let parse_err = |reason: &str| Error::Parse {
        path: path.to_path_buf(),
        reason: reason.to_string(),
        line: full_line.to_string(),
    };

    let mut fields = raw.splitn(3, ':');
    let doc_id: u32 = fields
        .next()
        .ok_or_else(|| parse_err("missing doc_id field"))?
        .parse()
        .map_err(|_| parse_err("non-numeric doc_id"))?;
    let term_freq: u32 = fields
        .next()
        .ok_or_else(|| parse_err("missing term_freq field"))?
        .parse()
        .map_err(|_| parse_err("non-numeric term_freq"))?;
    let positions_raw = fields.next().ok_or_else(|| parse_err("missing position list"))?;

    if positions_raw.is_empty() {
        return Err(parse_err("empty position list"));
    }

    let positions: Vec<u32> = positions_raw
        .split(',')
        .map(|p| p.parse::<u32>().map_err(|_| parse_err("non-numeric position")))
        .collect::<Result<_>>()?;

    if positions.len() as u32 != term_freq {
        return Err(parse_err("term_freq does not match position count"));
    }

    Ok(Posting::from_positions(doc_id, positions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        for (term, doc_id, position) in [
            ("market", 1u32, 3u32),
            ("market", 1, 11),
            ("market", 1, 15),
            ("market", 2, 4),
            ("predict", 1, 10),
            ("predict", 1, 23),
            ("predict", 2, 2),
        ] {
            index.record(term.to_string(), doc_id, position);
        }
        index
    }

    #[test]
    fn formats_shard_line_per_grammar() {
        let index = sample_index();
        let postings = index.postings("market").unwrap();
        assert_eq!(format_line("market", postings), "market 1:3:3,11,15;2:1:4");
    }

    #[test]
    fn s3_shard_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let index = sample_index();
        let config = ShardWriterConfig::new(tmp.path(), 3);
        write_shards(&index, &config).unwrap();

        let reloaded = read_shards(tmp.path()).unwrap();
        for term in ["market", "predict"] {
            assert_eq!(index.postings(term), reloaded.postings(term));
        }
    }

    #[test]
    fn rejects_non_positive_shard_count() {
        let tmp = tempfile::tempdir().unwrap();
        let index = sample_index();
        let config = ShardWriterConfig::new(tmp.path(), 0);
        assert!(matches!(
            write_shards(&index, &config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn skips_lines_without_space_but_fails_on_malformed_postings() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("shard-0.txt"), "nospacehere\nmarket 1:2:3\n").unwrap();
        let err = read_shards(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn doc_table_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let mut table = DocumentTable::new();
        table.push(PathBuf::from("a.txt"));
        table.push(PathBuf::from("b.txt"));
        write_doc_table(&table, tmp.path()).unwrap();

        let reloaded = read_doc_table(tmp.path()).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.path(1), Some(Path::new("a.txt")));
    }
}
