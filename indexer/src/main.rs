use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::DocId;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One record from the document source. The source is expected to have
/// stripped any markup; `text` is plain text.
#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a boolean retrieval index from plain-text documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory of .json/.jsonl files)
        #[arg(long)]
        input: PathBuf,
        /// Output index file
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build_index(&input, &output),
    }
}

fn build_index(input: &Path, output: &Path) -> Result<()> {
    let mut documents: Vec<(DocId, String)> = Vec::new();
    let mut unparsable = 0usize;

    for file in collect_input_files(input)? {
        read_records(&file, &mut documents, &mut unparsable)
            .with_context(|| format!("reading {}", file.display()))?;
    }

    let (index, report) = engine::build(documents);
    let failed = report.failed + unparsable;
    index
        .save(output)
        .with_context(|| format!("saving index to {}", output.display()))?;

    tracing::info!(
        processed = report.processed,
        failed,
        docs = index.doc_count(),
        terms = index.term_count(),
        output = %output.display(),
        "index build complete"
    );
    println!(
        "indexed {} documents ({} failed), {} terms -> {}",
        report.processed,
        failed,
        index.term_count(),
        output.display()
    );
    Ok(())
}

fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
        let p = entry.path();
        if p.is_file()
            && matches!(
                p.extension().and_then(|s| s.to_str()),
                Some("json") | Some("jsonl")
            )
        {
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    anyhow::ensure!(!files.is_empty(), "no .json/.jsonl files under {}", input.display());
    Ok(files)
}

/// Parse a file of records into `documents`. JSONL is read line by line;
/// `.json` may hold a single object or an array. A record that fails to
/// parse is counted and skipped, never aborting the run.
fn read_records(
    file: &Path,
    documents: &mut Vec<(DocId, String)>,
    unparsable: &mut usize,
) -> Result<()> {
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let reader = BufReader::new(File::open(file)?);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<InputDoc>(&line) {
                Ok(doc) => documents.push((doc.id, doc.text)),
                Err(err) => {
                    tracing::warn!(file = %file.display(), %err, "skipping unparsable record");
                    *unparsable += 1;
                }
            }
        }
    } else {
        let reader = BufReader::new(File::open(file)?);
        let json: serde_json::Value = match serde_json::from_reader(reader) {
            Ok(json) => json,
            Err(err) => {
                // one bad file must not abort the whole build
                tracing::warn!(file = %file.display(), %err, "skipping unparsable file");
                *unparsable += 1;
                return Ok(());
            }
        };
        let records = match json {
            serde_json::Value::Array(arr) => arr,
            other => vec![other],
        };
        for value in records {
            match serde_json::from_value::<InputDoc>(value) {
                Ok(doc) => documents.push((doc.id, doc.text)),
                Err(err) => {
                    tracing::warn!(file = %file.display(), %err, "skipping unparsable record");
                    *unparsable += 1;
                }
            }
        }
    }
    Ok(())
}
