//! Properties that must hold for any event sequence.

use agentgraph_core::model::*;
use agentgraph_core::storage::MemoryStore;
use agentgraph_mapper::{EventMapper, Outcome, SkipReason};
use proptest::prelude::*;

fn envelope(ts: u64, log_index: u64) -> EventEnvelope {
    EventEnvelope {
        block_timestamp: BlockTimestamp(ts),
        block_number: ts,
        transaction_hash: format!("0x{ts:x}"),
        log_index,
    }
}

fn registered_mapper(did: &str) -> EventMapper<MemoryStore> {
    let mut mapper = EventMapper::new(MemoryStore::new());
    mapper
        .handle(&LoggedEvent {
            envelope: envelope(1, 0),
            event: AgentEvent::Registered(AgentRegistered {
                did: did.into(),
                name: "Scout".into(),
                description: String::new(),
                owner: Bytes(vec![1; 20]),
                ipfs_hash: Bytes(vec![2; 4]),
            }),
        })
        .unwrap();
    mapper
}

/// Events that never register anyone.
fn arb_non_registration() -> impl Strategy<Value = AgentEvent> {
    prop_oneof![
        ("[a-z]{1,6}", "[a-z0-9]{0,8}").prop_map(|(name, hash)| {
            AgentEvent::Updated(AgentUpdated {
                did: "ghost".into(),
                name,
                ipfs_hash: Bytes(hash.into_bytes()),
            })
        }),
        (-3i128..8).prop_map(|code| {
            AgentEvent::StatusChanged(AgentStatusChanged {
                did: "ghost".into(),
                new_status: code,
            })
        }),
        ("[a-z]{1,6}", "[a-z0-9]{0,8}").prop_map(|(name, value)| {
            AgentEvent::CapabilityAdded(CapabilityAdded {
                did: "ghost".into(),
                capability_name: name,
                capability_value: value,
            })
        }),
    ]
}

proptest! {
    #[test]
    fn prop_capability_versions_count_writes(
        values in prop::collection::vec("[a-z0-9]{0,6}", 1..20)
    ) {
        let mut mapper = registered_mapper("agent:1");
        let key = CapabilityKey::new("agent:1", "vision");

        for (i, value) in values.iter().enumerate() {
            let ts = 10 + i as u64;
            mapper.handle(&LoggedEvent {
                envelope: envelope(ts, 0),
                event: AgentEvent::CapabilityAdded(CapabilityAdded {
                    did: "agent:1".into(),
                    capability_name: "vision".into(),
                    capability_value: value.clone(),
                }),
            }).unwrap();

            let capability = mapper.store().capability(&key).unwrap();
            prop_assert_eq!(capability.version, i as u64 + 1);
            prop_assert_eq!(&capability.value, value);
            prop_assert_eq!(capability.created_at, BlockTimestamp(10));
        }
    }

    #[test]
    fn prop_last_active_moves_only_on_active(codes in prop::collection::vec(-2i128..6, 1..30)) {
        let mut mapper = registered_mapper("agent:1");
        let did = Did::from("agent:1");
        let mut expected_last_active = BlockTimestamp(1);

        for (i, code) in codes.iter().enumerate() {
            let ts = 10 + i as u64;
            let before = mapper.store().status_change_count();
            mapper.handle(&LoggedEvent {
                envelope: envelope(ts, 0),
                event: AgentEvent::StatusChanged(AgentStatusChanged {
                    did: did.clone(),
                    new_status: *code,
                }),
            }).unwrap();

            // One audit entry per status event, self-transitions included
            prop_assert_eq!(mapper.store().status_change_count(), before + 1);

            let resolved = StatusCode::decode(*code).resolve();
            if resolved == RuntimeStatus::Active {
                expected_last_active = BlockTimestamp(ts);
            }
            let agent = mapper.store().agent(&did).unwrap();
            prop_assert_eq!(agent.runtime_status, resolved);
            prop_assert_eq!(agent.last_active_at, expected_last_active);
            prop_assert!(agent.updated_at >= agent.created_at);
        }
    }

    #[test]
    fn prop_unknown_agent_events_write_nothing(
        events in prop::collection::vec(arb_non_registration(), 1..25)
    ) {
        let mut mapper = registered_mapper("agent:1");
        let writes_before = mapper.store().write_count();

        for (i, event) in events.into_iter().enumerate() {
            let outcome = mapper.handle(&LoggedEvent {
                envelope: envelope(10 + i as u64, 0),
                event,
            }).unwrap();
            prop_assert_eq!(outcome, Outcome::Skipped(SkipReason::UnknownAgent));
        }
        prop_assert_eq!(mapper.store().write_count(), writes_before);
    }
}
