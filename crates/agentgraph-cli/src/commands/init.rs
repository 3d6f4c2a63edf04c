use agentgraph_core::config::{MapperConfig, ReRegistration};
use agentgraph_core::storage::GitStore;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct InitArgs {
    /// Force re-initialization
    #[arg(long)]
    pub force: bool,

    /// What to do with a registration for an existing DID (overwrite or ignore)
    #[arg(long, default_value = "overwrite")]
    pub reregistration: ReRegistration,
}

pub fn run(args: &InitArgs) -> Result<()> {
    let store =
        GitStore::discover().context("Not inside a Git repository. Run `git init` first.")?;

    if store.is_initialized() && !args.force {
        println!("agentgraph is already initialized in this repository.");
        println!("Use --force to re-initialize.");
        return Ok(());
    }

    let settings = MapperConfig {
        reregistration: args.reregistration,
        ..MapperConfig::default_init()
    };
    store
        .init_with(&settings)
        .context("Failed to initialize agentgraph")?;

    println!(
        "agentgraph initialized (re-registration: {}).",
        settings.reregistration.as_str()
    );
    println!();
    println!("Next steps:");
    println!("  agentgraph ingest <events.jsonl>   Replay an event log into this repository");
    Ok(())
}
