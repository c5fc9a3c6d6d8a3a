mod cli;
mod commands;
mod context;
mod output;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Ingest(cmd) => commands::ingest::run(cmd),
        Command::Index(cmd) => {
            context::build_and_write_index(&cmd.input, &cmd.index_dir, cmd.num_shards)
                .context("failed to build and write index")?;
            println!(
                "built index from {} into {}",
                cmd.input.display(),
                cmd.index_dir.display()
            );
            Ok(())
        }
        Command::Search(cmd) => commands::search::run(cmd),
        Command::Repl(cmd) => commands::repl::run(cmd),
    }
}

/// Map an error to a process exit code: `1` for I/O or parse failures,
/// `2` for invalid configuration, `1` as a catch-all otherwise.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ferret_core::Error>() {
        Some(ferret_core::Error::Config(_)) => 2,
        Some(ferret_core::Error::Io(_) | ferret_core::Error::Parse { .. } | ferret_core::Error::EmptyCorpus(_)) => 1,
        None => 1,
    }
}
