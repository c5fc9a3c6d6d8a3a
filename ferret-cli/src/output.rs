use std::path::PathBuf;

use clap::ValueEnum;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// JSON output.
    Json,
}

/// Print a ranked list of `(display path, score)` pairs.
pub fn print_results(results: &[(PathBuf, f64)], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let json_results: Vec<serde_json::Value> = results
                .iter()
                .map(|(path, score)| {
                    json!({
                        "path": path.to_string_lossy(),
                        "score": score,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json_results).unwrap());
        }
        OutputFormat::Table => {
            if results.is_empty() {
                println!("No results found.");
                return;
            }

            let rows: Vec<ResultRow> = results
                .iter()
                .enumerate()
                .map(|(i, (path, score))| ResultRow {
                    rank: i + 1,
                    path: path.display().to_string(),
                    score: format!("{score:.4}"),
                })
                .collect();

            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Document")]
    path: String,
    #[tabled(rename = "Score")]
    score: String,
}
