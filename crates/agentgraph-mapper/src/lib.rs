//! Event-to-entity mapping for the agent registry.
//!
//! Four handlers, one per registry event, each a function of the event, its
//! block envelope and an [`EntityStore`]. [`EventMapper`] dispatches a
//! [`LoggedEvent`] to the right one. Handlers never reorder or deduplicate;
//! the caller feeds events in log order.
//!
//! [`EntityStore`]: agentgraph_core::storage::EntityStore
//! [`LoggedEvent`]: agentgraph_core::model::LoggedEvent

pub mod error;
pub mod handlers;
pub mod mapper;
pub mod outcome;

pub use error::MapError;
pub use handlers::{
    handle_agent_registered, handle_agent_status_changed, handle_agent_updated,
    handle_capability_added,
};
pub use mapper::EventMapper;
pub use outcome::{Outcome, SkipReason};
