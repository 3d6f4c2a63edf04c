use std::path::PathBuf;

use agentgraph_core::model::{LogPosition, LoggedEvent};
use agentgraph_core::storage::EntityStore;
use agentgraph_mapper::{EventMapper, Outcome, SkipReason};
use serde::Serialize;

use crate::cursor::{Cursor, IngestLock};
use crate::error::IngestError;

/// Counts from one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub events_read: usize,
    pub applied: usize,
    pub writes: usize,
    pub skipped_unknown_agent: usize,
    pub skipped_already_registered: usize,
    /// Events at or before the stored cursor, not handed to the mapper.
    pub replayed: usize,
    /// Events whose position was lower than the one before them in the log.
    pub out_of_order: usize,
    pub cursor: Option<LogPosition>,
}

/// Drives an [`EventMapper`] over a sequence of logged events.
pub struct Ingestor<S> {
    mapper: EventMapper<S>,
    cursor_path: Option<PathBuf>,
}

impl<S: EntityStore> Ingestor<S> {
    pub fn new(mapper: EventMapper<S>) -> Self {
        Self {
            mapper,
            cursor_path: None,
        }
    }

    /// Persist progress to `path` and skip events it already covers.
    pub fn with_cursor(mut self, path: impl Into<PathBuf>) -> Self {
        self.cursor_path = Some(path.into());
        self
    }

    /// Feed events to the mapper in the order given.
    ///
    /// Positions that go backwards are logged and applied anyway; ordering is
    /// the log producer's job. The first parse or store error stops the run,
    /// with the cursor left after the last event that was fully handled.
    pub fn run<I>(&mut self, events: I) -> Result<IngestReport, IngestError>
    where
        I: IntoIterator<Item = Result<(usize, LoggedEvent), IngestError>>,
    {
        let _lock = match &self.cursor_path {
            Some(path) => Some(IngestLock::acquire(&IngestLock::path_for(path))?),
            None => None,
        };
        let mut cursor = match &self.cursor_path {
            Some(path) => Cursor::load(path)?,
            None => None,
        };
        // Fixed for the whole run; `cursor` keeps advancing on its own
        let resume_from = cursor;
        if let Some(c) = &resume_from {
            tracing::info!(position = %c.position, "Resuming after stored cursor");
        }

        let mut report = IngestReport::default();
        let mut last_seen: Option<LogPosition> = None;

        for item in events {
            let (line, event) = item?;
            report.events_read += 1;
            let position = event.envelope.position();

            if let Some(previous) = last_seen {
                if position < previous {
                    report.out_of_order += 1;
                    tracing::warn!(
                        line,
                        %position,
                        %previous,
                        "Event position goes backwards, applying in file order"
                    );
                }
            }
            last_seen = Some(position);

            if resume_from.is_some_and(|c| c.covers(position)) {
                report.replayed += 1;
                continue;
            }

            let outcome = self
                .mapper
                .handle(&event)
                .map_err(|source| IngestError::Map { line, source })?;
            match outcome {
                Outcome::Applied { writes } => {
                    report.applied += 1;
                    report.writes += writes;
                }
                Outcome::Skipped(SkipReason::UnknownAgent) => report.skipped_unknown_agent += 1,
                Outcome::Skipped(SkipReason::AlreadyRegistered) => {
                    report.skipped_already_registered += 1
                }
            }

            let c = cursor.get_or_insert_with(|| Cursor::new(position));
            c.advance(position);
            if let Some(path) = &self.cursor_path {
                c.save(path)?;
            }
        }

        report.cursor = cursor.map(|c| c.position);
        tracing::info!(
            read = report.events_read,
            applied = report.applied,
            writes = report.writes,
            replayed = report.replayed,
            skipped = report.skipped_unknown_agent + report.skipped_already_registered,
            "Ingestion finished"
        );
        Ok(report)
    }

    pub fn mapper(&self) -> &EventMapper<S> {
        &self.mapper
    }

    pub fn into_mapper(self) -> EventMapper<S> {
        self.mapper
    }
}
