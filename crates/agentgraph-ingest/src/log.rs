use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use agentgraph_core::model::LoggedEvent;

use crate::error::IngestError;

/// Line-by-line reader over a JSONL event log.
///
/// Yields `(line_number, event)` with 1-based line numbers. Blank lines are
/// skipped. A malformed line is reported as an error and iteration continues
/// with the next line, so the caller decides whether to stop.
#[derive(Debug)]
pub struct EventLog<R> {
    lines: Lines<R>,
    line: usize,
}

impl EventLog<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> EventLog<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for EventLog<R> {
    type Item = Result<(usize, LoggedEvent), IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.lines.next()? {
                Ok(raw) => raw,
                Err(e) => return Some(Err(IngestError::Io(e))),
            };
            self.line += 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let line = self.line;
            return Some(
                serde_json::from_str::<LoggedEvent>(trimmed)
                    .map(|event| (line, event))
                    .map_err(|source| IngestError::Parse { line, source }),
            );
        }
    }
}
