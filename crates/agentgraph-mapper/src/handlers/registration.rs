use agentgraph_core::model::status::REASON_REGISTERED;
use agentgraph_core::model::{
    Agent, AgentRegistered, EventEnvelope, RuntimeStatus, StatusChange, StatusChangeId,
};
use agentgraph_core::storage::{EntityStore, WriteBatch};

use crate::error::MapError;
use crate::outcome::Outcome;

/// Handle an agent registration.
///
/// Always builds a fresh agent and its founding status change; an existing
/// agent with the same DID is replaced. Policy checks belong to the caller.
pub fn handle_agent_registered<S: EntityStore + ?Sized>(
    event: &AgentRegistered,
    envelope: &EventEnvelope,
    store: &mut S,
) -> Result<Outcome, MapError> {
    let ts = envelope.block_timestamp;

    let agent = Agent {
        did: event.did.clone(),
        name: event.name.clone(),
        description: event.description.clone(),
        owner_address: event.owner.clone(),
        ipfs_metadata_hash: event.ipfs_hash.clone(),
        runtime_status: RuntimeStatus::Active,
        created_at: ts,
        updated_at: ts,
        last_active_at: ts,
    };

    let founding = StatusChange {
        id: StatusChangeId::new(envelope.transaction_hash.clone(), envelope.log_index),
        agent: event.did.clone(),
        previous_status: None,
        new_status: RuntimeStatus::Active,
        timestamp: ts,
        reason: REASON_REGISTERED.to_string(),
        block_number: envelope.block_number,
        transaction_hash: envelope.transaction_hash.clone(),
    };

    let mut batch = WriteBatch::new();
    batch.push(agent).push(founding);
    let writes = batch.len();
    store.apply(batch)?;

    Ok(Outcome::Applied { writes })
}
