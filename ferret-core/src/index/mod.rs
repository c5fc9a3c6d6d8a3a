//! Positional inverted index construction and sharded persistence.

mod builder;
mod inverted;
mod posting;
mod shard;

pub use builder::build_index;
pub use inverted::{DocId, DocumentTable, InvertedIndex};
pub use posting::Posting;
pub use shard::{read_doc_table, read_shards, write_doc_table, write_shards, ShardWriterConfig};
