//! Entity model and storage for agentgraph.
//!
//! Agents, their status audit log and their capabilities, the registry
//! events that drive them, and the [`storage::EntityStore`] seam the mapper
//! writes through.

pub mod config;
pub mod error;
pub mod model;
pub mod storage;

pub use error::CoreError;
