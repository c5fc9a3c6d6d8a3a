use std::fs;
use std::io::Read;

use anyhow::{Context, Result};

use crate::cli::IngestCommand;
use crate::context;

/// Unpack a zip archive of raw `.txt` files into a directory of normalized
/// text files, one output line per input line.
pub fn run(cmd: IngestCommand) -> Result<()> {
    let normalizer = context::load_normalizer(cmd.stopwords.as_deref());

    let archive_file = fs::File::open(&cmd.zip)
        .with_context(|| format!("failed to open {}", cmd.zip.display()))?;
    let mut archive = zip::ZipArchive::new(archive_file)
        .with_context(|| format!("failed to read zip archive {}", cmd.zip.display()))?;

    fs::create_dir_all(&cmd.output)
        .with_context(|| format!("failed to create {}", cmd.output.display()))?;

    let mut ingested = 0usize;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let Some(entry_path) = entry.enclosed_name() else {
            continue;
        };
        if entry_path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }

        let mut raw = String::new();
        entry.read_to_string(&mut raw)?;

        let normalized: Vec<String> = raw
            .lines()
            .map(|line| normalizer.normalize_line(line).join(" "))
            .collect();

        let file_name = entry_path
            .file_name()
            .map(|name| name.to_owned())
            .with_context(|| format!("zip entry has no file name: {}", entry_path.display()))?;
        let dest = cmd.output.join(file_name);
        fs::write(&dest, normalized.join("\n")).with_context(|| format!("failed to write {}", dest.display()))?;
        ingested += 1;
    }

    println!(
        "ingested {ingested} document(s) from {} into {}",
        cmd.zip.display(),
        cmd.output.display()
    );

    Ok(())
}
