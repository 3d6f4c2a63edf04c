use agentgraph_core::model::{AgentUpdated, EventEnvelope};
use agentgraph_core::storage::{load_agent, EntityStore, Lookup, WriteBatch};

use crate::error::MapError;
use crate::outcome::{Outcome, SkipReason};

/// Handle an agent metadata update. Only `name`, `ipfs_metadata_hash` and
/// `updated_at` change.
pub fn handle_agent_updated<S: EntityStore + ?Sized>(
    event: &AgentUpdated,
    envelope: &EventEnvelope,
    store: &mut S,
) -> Result<Outcome, MapError> {
    let mut agent = match load_agent(&*store, &event.did)? {
        Lookup::Found(agent) => agent,
        Lookup::NotFound => return Ok(Outcome::Skipped(SkipReason::UnknownAgent)),
    };

    agent.name = event.name.clone();
    agent.ipfs_metadata_hash = event.ipfs_hash.clone();
    agent.updated_at = envelope.block_timestamp;

    let mut batch = WriteBatch::new();
    batch.push(agent);
    store.apply(batch)?;

    Ok(Outcome::Applied { writes: 1 })
}
