use agentgraph_core::model::{Capability, CapabilityAdded, CapabilityKey, EventEnvelope};
use agentgraph_core::storage::{load_agent, load_capability, EntityStore, Lookup, WriteBatch};

use crate::error::MapError;
use crate::outcome::{Outcome, SkipReason};

/// Handle a capability write: create the slot at version 1 or bump its
/// version by one.
pub fn handle_capability_added<S: EntityStore + ?Sized>(
    event: &CapabilityAdded,
    envelope: &EventEnvelope,
    store: &mut S,
) -> Result<Outcome, MapError> {
    if let Lookup::NotFound = load_agent(&*store, &event.did)? {
        return Ok(Outcome::Skipped(SkipReason::UnknownAgent));
    }

    let ts = envelope.block_timestamp;
    let key = CapabilityKey::new(event.did.clone(), event.capability_name.clone());

    let mut capability = match load_capability(&*store, &key)? {
        Lookup::Found(mut existing) => {
            // u64 versions saturate instead of wrapping
            if existing.version == u64::MAX {
                tracing::warn!(key = %key, "Capability version saturated");
            }
            existing.version = existing.version.saturating_add(1);
            existing
        }
        Lookup::NotFound => Capability {
            id: key.clone(),
            agent: event.did.clone(),
            name: event.capability_name.clone(),
            value: String::new(),
            version: 1,
            created_at: ts,
            updated_at: ts,
        },
    };
    capability.value = event.capability_value.clone();
    capability.updated_at = ts;

    let mut batch = WriteBatch::new();
    batch.push(capability);
    store.apply(batch)?;

    Ok(Outcome::Applied { writes: 1 })
}
