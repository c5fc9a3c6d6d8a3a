use anyhow::Result;
use ferret_core::{top_n, Ranker};

use crate::cli::SearchCommand;
use crate::context;
use crate::output;

/// Execute a single query against a built index and print the top results.
pub fn run(cmd: SearchCommand) -> Result<()> {
    let (index, doc_table) = context::load_index(&cmd.index_dir)?;
    let normalizer = context::load_normalizer(cmd.stopwords.as_deref());

    let query_terms = normalizer.normalize_line(&cmd.query);
    log::debug!("normalized query {:?} -> {:?}", cmd.query, query_terms);

    let ranker = Ranker::new(&index, &doc_table);
    let scores = ranker.rank(&query_terms);
    let results = top_n(&scores, &doc_table, cmd.top);

    output::print_results(&results, cmd.format);

    Ok(())
}
