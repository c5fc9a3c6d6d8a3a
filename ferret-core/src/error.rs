//! The closed error type shared by every component of the core pipeline.

use std::path::PathBuf;

/// Errors surfaced by `ferret-core`.
///
/// This is a closed sum: normalization itself never fails (see
/// [`crate::analysis::normalizer`]), so every variant here originates from
/// configuration, filesystem I/O, or a malformed shard file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value was missing, not a directory, or out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An I/O failure while reading input files or reading/writing shards.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A shard line could not be parsed according to the shard grammar.
    #[error("malformed shard line in {path}: {reason} (line: {line:?})")]
    Parse {
        path: PathBuf,
        reason: String,
        line: String,
    },

    /// `build_index` was invoked on a directory containing no `.txt` files.
    #[error("no .txt files found under {0}")]
    EmptyCorpus(PathBuf),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
