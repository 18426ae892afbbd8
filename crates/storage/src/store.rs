//! Append-Only Log Store

use crate::StorageError;
use data_validator::LogEntry;
use std::sync::RwLock;
use tracing::{debug, info};

/// Ordered, append-only sequence of validated log entries.
///
/// There is no update or delete. Construct one per process (or per test) and
/// hand it to the ingestor and the aggregator; writers take the lock once per
/// batch so readers never see half a batch.
pub struct LogStore {
    entries: RwLock<Vec<LogEntry>>,
}

impl LogStore {
    /// Create an empty store
    pub fn new() -> Self {
        info!("Creating in-memory log store");
        Self {
            entries: RwLock::new(Vec::with_capacity(1024)),
        }
    }

    /// Append a whole batch in submitted order, returning how many were added
    pub fn append_batch(&self, batch: Vec<LogEntry>) -> Result<usize, StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        let appended = batch.len();
        entries.extend(batch);
        debug!(appended, total = entries.len(), "Appended log batch");

        Ok(appended)
    }

    /// Run `f` over a consistent view of the store
    pub fn read<R>(&self, f: impl FnOnce(&[LogEntry]) -> R) -> Result<R, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;

        Ok(f(&entries))
    }

    /// Copy of every stored entry
    pub fn snapshot(&self) -> Result<Vec<LogEntry>, StorageError> {
        self.read(|entries| entries.to_vec())
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}
