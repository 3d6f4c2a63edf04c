pub mod ingest;
pub mod init;
pub mod version;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize agentgraph in the current Git repository
    Init(init::InitArgs),
    /// Replay a JSONL event log into the entity store
    Ingest(ingest::IngestArgs),
    /// Print version information
    Version,
}
