//! Replay a JSONL event log through the mapper.
//!
//! Each line of the log is one [`LoggedEvent`] in flat form. The driver feeds
//! them to an [`EventMapper`] in file order and keeps a cursor so a second run
//! over the same log does not re-apply what the first one already did.
//!
//! [`LoggedEvent`]: agentgraph_core::model::LoggedEvent
//! [`EventMapper`]: agentgraph_mapper::EventMapper

pub mod cursor;
pub mod error;
pub mod ingestor;
pub mod log;

pub use cursor::{Cursor, IngestLock};
pub use error::IngestError;
pub use ingestor::{IngestReport, Ingestor};
pub use log::EventLog;
