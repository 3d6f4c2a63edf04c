use agentgraph_core::config::{MapperConfig, ReRegistration};
use agentgraph_core::model::{AgentEvent, AgentRegistered, EventEnvelope, LoggedEvent};
use agentgraph_core::storage::{load_agent, EntityStore};

use crate::error::MapError;
use crate::handlers;
use crate::outcome::{Outcome, SkipReason};

/// Routes each logged event to its handler against one store.
///
/// Strictly sequential: an event is fully applied (or skipped) before
/// `handle` returns.
pub struct EventMapper<S> {
    store: S,
    config: MapperConfig,
}

impl<S: EntityStore> EventMapper<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, MapperConfig::default())
    }

    pub fn with_config(store: S, config: MapperConfig) -> Self {
        Self { store, config }
    }

    /// Apply one event. Store failures abort the event and are returned.
    pub fn handle(&mut self, logged: &LoggedEvent) -> Result<Outcome, MapError> {
        let envelope = &logged.envelope;
        let outcome = match &logged.event {
            AgentEvent::Registered(e) => self.register(e, envelope)?,
            AgentEvent::Updated(e) => handlers::handle_agent_updated(e, envelope, &mut self.store)?,
            AgentEvent::StatusChanged(e) => {
                handlers::handle_agent_status_changed(e, envelope, &mut self.store)?
            }
            AgentEvent::CapabilityAdded(e) => {
                handlers::handle_capability_added(e, envelope, &mut self.store)?
            }
        };

        match outcome {
            Outcome::Applied { writes } => tracing::debug!(
                event = logged.event.name(),
                did = %logged.event.did(),
                position = %envelope.position(),
                writes,
                "Applied event"
            ),
            Outcome::Skipped(reason) => tracing::debug!(
                event = logged.event.name(),
                did = %logged.event.did(),
                position = %envelope.position(),
                %reason,
                "Skipped event"
            ),
        }

        Ok(outcome)
    }

    fn register(
        &mut self,
        event: &AgentRegistered,
        envelope: &EventEnvelope,
    ) -> Result<Outcome, MapError> {
        if self.config.reregistration == ReRegistration::Ignore
            && load_agent(&self.store, &event.did)?.is_found()
        {
            return Ok(Outcome::Skipped(SkipReason::AlreadyRegistered));
        }
        handlers::handle_agent_registered(event, envelope, &mut self.store)
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
