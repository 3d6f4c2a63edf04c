use agentgraph_core::model::status::REASON_STATUS_CHANGED;
use agentgraph_core::model::{
    AgentStatusChanged, EventEnvelope, RuntimeStatus, StatusChange, StatusChangeId, StatusCode,
};
use agentgraph_core::storage::{load_agent, EntityStore, Lookup, WriteBatch};

use crate::error::MapError;
use crate::outcome::{Outcome, SkipReason};

/// Handle a runtime status change.
///
/// Every event for a known agent appends exactly one status change, even
/// when the status does not actually change. `last_active_at` moves only
/// when the decoded status is `Active`.
pub fn handle_agent_status_changed<S: EntityStore + ?Sized>(
    event: &AgentStatusChanged,
    envelope: &EventEnvelope,
    store: &mut S,
) -> Result<Outcome, MapError> {
    let mut agent = match load_agent(&*store, &event.did)? {
        Lookup::Found(agent) => agent,
        Lookup::NotFound => return Ok(Outcome::Skipped(SkipReason::UnknownAgent)),
    };

    let ts = envelope.block_timestamp;
    let previous = agent.runtime_status;
    let next = StatusCode::decode(event.new_status).resolve();

    agent.runtime_status = next;
    agent.updated_at = ts;
    if next == RuntimeStatus::Active {
        agent.last_active_at = ts;
    }

    let change = StatusChange {
        id: StatusChangeId::new(envelope.transaction_hash.clone(), envelope.log_index),
        agent: event.did.clone(),
        previous_status: Some(previous),
        new_status: next,
        timestamp: ts,
        reason: REASON_STATUS_CHANGED.to_string(),
        block_number: envelope.block_number,
        transaction_hash: envelope.transaction_hash.clone(),
    };

    let mut batch = WriteBatch::new();
    batch.push(agent).push(change);
    let writes = batch.len();
    store.apply(batch)?;

    Ok(Outcome::Applied { writes })
}
