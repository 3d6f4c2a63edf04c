use std::fs;
use std::io::{ErrorKind, Read as _, Write as _};
use std::path::{Path, PathBuf};

use agentgraph_core::model::LogPosition;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Furthest log position an ingestion run has processed.
///
/// Stored as JSON. Reads take a shared file lock, writes an exclusive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub position: LogPosition,
    /// Events processed up to and including `position`, across all runs.
    pub processed: u64,
}

impl Cursor {
    pub fn new(position: LogPosition) -> Self {
        Self {
            position,
            processed: 0,
        }
    }

    /// Whether an event at `position` was already processed.
    pub fn covers(&self, position: LogPosition) -> bool {
        position <= self.position
    }

    /// Record one more processed event. Never moves backwards.
    pub fn advance(&mut self, position: LogPosition) {
        self.position = self.position.max(position);
        self.processed += 1;
    }

    /// Load the cursor, or `None` if no run has stored one yet.
    pub fn load(path: &Path) -> Result<Option<Self>, IngestError> {
        let file = match fs::OpenOptions::new().read(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        fs2::FileExt::lock_shared(&file)?;
        let mut data = String::new();
        let read = (&file).read_to_string(&mut data);
        fs2::FileExt::unlock(&file)?;
        read?;
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| IngestError::Cursor(format!("{}: {e}", path.display())))
    }

    /// Save the cursor with an exclusive file lock.
    pub fn save(&self, path: &Path) -> Result<(), IngestError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| IngestError::Cursor(format!("Failed to serialize cursor: {e}")))?;
        let file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        fs2::FileExt::lock_exclusive(&file)?;
        (&file).write_all(json.as_bytes())?;
        fs2::FileExt::unlock(&file)?;
        Ok(())
    }

    /// Remove the cursor file so the next run starts from the beginning.
    pub fn clear(path: &Path) -> Result<(), IngestError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Exclusive lock held for the duration of one ingestion run.
///
/// Released when dropped.
#[derive(Debug)]
pub struct IngestLock {
    file: fs::File,
    path: PathBuf,
}

impl IngestLock {
    /// Lock file used alongside a cursor file.
    pub fn path_for(cursor_path: &Path) -> PathBuf {
        let mut name = cursor_path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Take the lock without waiting; fails with [`IngestError::Busy`] if held.
    pub fn acquire(path: &Path) -> Result<Self, IngestError> {
        let file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        fs2::FileExt::try_lock_exclusive(&file)
            .map_err(|_| IngestError::Busy(path.to_path_buf()))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for IngestLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pos(block_number: u64, log_index: u64) -> LogPosition {
        LogPosition {
            block_number,
            log_index,
        }
    }

    #[test]
    fn test_cursor_save_load_clear() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("agentgraph-cursor");

        assert!(Cursor::load(&path).unwrap().is_none());

        let mut cursor = Cursor::new(pos(3, 1));
        cursor.advance(pos(4, 0));
        cursor.save(&path).unwrap();

        let loaded = Cursor::load(&path).unwrap().unwrap();
        assert_eq!(loaded, cursor);
        assert_eq!(loaded.processed, 1);

        Cursor::clear(&path).unwrap();
        assert!(Cursor::load(&path).unwrap().is_none());
        Cursor::clear(&path).unwrap();
    }

    #[test]
    fn test_cursor_never_moves_back() {
        let mut cursor = Cursor::new(pos(10, 2));
        cursor.advance(pos(9, 7));
        assert_eq!(cursor.position, pos(10, 2));
        assert!(cursor.covers(pos(10, 2)));
        assert!(cursor.covers(pos(9, 99)));
        assert!(!cursor.covers(pos(10, 3)));
    }

    #[test]
    fn test_corrupt_cursor_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("agentgraph-cursor");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(Cursor::load(&path), Err(IngestError::Cursor(_))));
    }

    #[test]
    fn test_lock_is_exclusive() {
        let tmp = TempDir::new().unwrap();
        let path = IngestLock::path_for(&tmp.path().join("agentgraph-cursor"));
        assert!(path.to_string_lossy().ends_with("agentgraph-cursor.lock"));

        let held = IngestLock::acquire(&path).unwrap();
        assert!(matches!(IngestLock::acquire(&path), Err(IngestError::Busy(_))));
        drop(held);
        IngestLock::acquire(&path).unwrap();
    }
}
