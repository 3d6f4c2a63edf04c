use std::path::PathBuf;

use agentgraph_core::storage::GitStore;
use agentgraph_ingest::{Cursor, EventLog, Ingestor};
use agentgraph_mapper::EventMapper;
use anyhow::{Context, Result};
use clap::Args;

use crate::output::format::format_report;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct IngestArgs {
    /// JSONL event log, one event per line
    pub file: PathBuf,

    /// Discard the stored cursor and replay the log from its first line
    #[arg(long)]
    pub from_start: bool,
}

pub fn run(args: &IngestArgs, format: OutputFormat) -> Result<()> {
    let store = GitStore::discover().context("Not inside a Git repository")?;

    if !store.is_initialized() {
        anyhow::bail!("agentgraph is not initialized. Run `agentgraph init` first.");
    }

    let config = store.config().context("Failed to read agentgraph config")?;
    let cursor_path = store.git_dir().join(&config.cursor_file);
    if args.from_start {
        Cursor::clear(&cursor_path).context("Failed to clear cursor")?;
        tracing::info!(cursor = %cursor_path.display(), "Cursor cleared, replaying from the start");
    }

    let log = EventLog::open(&args.file)
        .with_context(|| format!("Failed to open event log {}", args.file.display()))?;

    let mapper = EventMapper::with_config(store, config);
    let report = Ingestor::new(mapper)
        .with_cursor(cursor_path)
        .run(log)
        .with_context(|| format!("Ingestion of {} stopped", args.file.display()))?;

    let rendered = format_report(&report, format).context("Failed to render ingestion report")?;
    println!("{rendered}");
    Ok(())
}
