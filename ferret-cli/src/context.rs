use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use ferret_core::{
    build_index, read_doc_table, read_shards, write_doc_table, write_shards, DocumentTable,
    InvertedIndex, Normalizer, ShardWriterConfig, StopwordSet,
};

/// Build a [`Normalizer`] from an optional stopword file; a missing `path`
/// argument is an empty stopword set, same as a missing file on disk.
pub fn load_normalizer(path: Option<&Path>) -> Normalizer {
    let stopwords = match path {
        Some(path) => StopwordSet::from_file(path),
        None => StopwordSet::empty(),
    };
    Normalizer::new(Arc::new(stopwords))
}

/// Build an index over `input` and persist it as shards plus a document
/// table under `index_dir`.
pub fn build_and_write_index(input: &Path, index_dir: &Path, num_shards: u32) -> Result<()> {
    let (index, doc_table) = build_index(input)
        .with_context(|| format!("failed to build index from {}", input.display()))?;

    let config = ShardWriterConfig::new(index_dir, num_shards);
    write_shards(&index, &config)
        .with_context(|| format!("failed to write shards to {}", index_dir.display()))?;
    write_doc_table(&doc_table, index_dir)
        .with_context(|| format!("failed to write document table to {}", index_dir.display()))?;

    Ok(())
}

/// Load a previously written index (shards + document table) from
/// `index_dir`.
pub fn load_index(index_dir: &Path) -> Result<(InvertedIndex, DocumentTable)> {
    let index = read_shards(index_dir)
        .with_context(|| format!("failed to read shards from {}", index_dir.display()))?;
    let doc_table = read_doc_table(index_dir)
        .with_context(|| format!("failed to read document table from {}", index_dir.display()))?;
    Ok((index, doc_table))
}
