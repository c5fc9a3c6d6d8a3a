use anyhow::Result;
use ferret_core::{top_n, Ranker};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::ReplCommand;
use crate::context;
use crate::output::{self, OutputFormat};

/// Interactive query shell: load the index once, then loop reading
/// queries from stdin until `quit`/`exit`/EOF.
pub fn run(cmd: ReplCommand) -> Result<()> {
    let (index, doc_table) = context::load_index(&cmd.index_dir)?;
    let normalizer = context::load_normalizer(cmd.stopwords.as_deref());
    let ranker = Ranker::new(&index, &doc_table);

    let mut rl = DefaultEditor::new()?;

    println!("ferret REPL (type 'quit' or 'exit' to leave)");

    loop {
        let line = match rl.readline("ferret> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("error: {err}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        if line == "quit" || line == "exit" {
            break;
        }

        handle_query(&ranker, &normalizer, &doc_table, line, cmd.format);
    }

    println!("Goodbye.");
    Ok(())
}

fn handle_query(
    ranker: &Ranker,
    normalizer: &ferret_core::Normalizer,
    doc_table: &ferret_core::DocumentTable,
    query: &str,
    format: OutputFormat,
) {
    let query_terms = normalizer.normalize_line(query);
    let scores = ranker.rank(&query_terms);
    let results = top_n(&scores, doc_table, 10);
    output::print_results(&results, format);
}
