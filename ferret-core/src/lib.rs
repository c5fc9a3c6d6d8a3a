//! `ferret-core`: positional inverted-index construction, sharded
//! on-disk persistence, and tf-idf/proximity ranking.
//!
//! The pipeline is Normalizer -> Indexer -> Shard Writer -> Shard Reader
//! -> Ranker, each a separate module below. The crate is single-threaded
//! and synchronous: every operation is either blocking I/O or pure
//! computation, with no suspension points visible to callers.

pub mod analysis;
pub mod error;
pub mod index;
pub mod rank;

pub use analysis::{Normalizer, StopwordSet, Term};
pub use error::{Error, Result};
pub use index::{build_index, read_doc_table, read_shards, write_doc_table, write_shards};
pub use index::{DocId, DocumentTable, InvertedIndex, Posting, ShardWriterConfig};
pub use rank::{top_n, Ranker};
