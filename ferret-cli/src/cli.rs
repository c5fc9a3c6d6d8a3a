use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Ferret - a positional inverted-index text search engine
#[derive(Parser)]
#[command(name = "ferret", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Unpack a zip archive of raw .txt files into normalized text files.
    Ingest(IngestCommand),
    /// Build a positional inverted index from normalized text and write shards.
    Index(IndexCommand),
    /// Run a single query against a built index.
    Search(SearchCommand),
    /// Start an interactive query shell against a built index.
    Repl(ReplCommand),
}

#[derive(Parser)]
pub struct IngestCommand {
    /// Path to the zip archive of raw .txt files.
    #[arg(long)]
    pub zip: PathBuf,

    /// Directory to write normalized .txt files into.
    #[arg(long)]
    pub output: PathBuf,

    /// Path to the stopword file (one word per line).
    #[arg(long, env = "FERRET_STOPWORDS")]
    pub stopwords: Option<PathBuf>,
}

#[derive(Parser)]
pub struct IndexCommand {
    /// Directory of already-normalized .txt files.
    #[arg(long)]
    pub input: PathBuf,

    /// Directory to write shard files and the document table into.
    #[arg(long, env = "FERRET_INDEX_DIR")]
    pub index_dir: PathBuf,

    /// Number of shard files to partition terms across.
    #[arg(long, default_value_t = 4)]
    pub num_shards: u32,
}

#[derive(Parser)]
pub struct SearchCommand {
    /// Directory containing shard files and the document table.
    #[arg(long, env = "FERRET_INDEX_DIR")]
    pub index_dir: PathBuf,

    /// Free-text query.
    pub query: String,

    /// Number of results to display.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Path to the stopword file used to normalize the query.
    #[arg(long, env = "FERRET_STOPWORDS")]
    pub stopwords: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Parser)]
pub struct ReplCommand {
    /// Directory containing shard files and the document table.
    #[arg(long, env = "FERRET_INDEX_DIR")]
    pub index_dir: PathBuf,

    /// Path to the stopword file used to normalize queries.
    #[arg(long, env = "FERRET_STOPWORDS")]
    pub stopwords: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}
