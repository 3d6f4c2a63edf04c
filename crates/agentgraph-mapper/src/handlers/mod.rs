mod capability;
mod registration;
mod status;
mod update;

pub use capability::handle_capability_added;
pub use registration::handle_agent_registered;
pub use status::handle_agent_status_changed;
pub use update::handle_agent_updated;

#[cfg(test)]
pub(crate) mod fixtures {
    use agentgraph_core::model::{AgentRegistered, BlockTimestamp, Bytes, EventEnvelope};
    use agentgraph_core::storage::MemoryStore;

    pub fn envelope(ts: u64, tx: &str, log_index: u64) -> EventEnvelope {
        EventEnvelope {
            block_timestamp: BlockTimestamp(ts),
            block_number: ts / 10,
            transaction_hash: tx.to_string(),
            log_index,
        }
    }

    pub fn registration(did: &str, name: &str) -> AgentRegistered {
        AgentRegistered {
            did: did.into(),
            name: name.into(),
            description: format!("{name} description"),
            owner: Bytes(vec![0xaa; 20]),
            ipfs_hash: Bytes(vec![0x12, 0x20, 0x01]),
        }
    }

    /// Store with `did` registered at `ts`.
    pub fn registered(did: &str, ts: u64) -> MemoryStore {
        let mut store = MemoryStore::new();
        super::handle_agent_registered(
            &registration(did, "Scout"),
            &envelope(ts, "0xreg", 0),
            &mut store,
        )
        .unwrap();
        store
    }
}
