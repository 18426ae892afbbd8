//! Store Summary

use crate::statistics::{ComponentStats, RunningStats};
use data_validator::{Component, LogEntry};
use serde::Serialize;
use std::collections::BTreeMap;
use storage::{LogStore, StorageError};
use tracing::debug;

/// Aggregate view of every stored log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Total stored entries
    pub count: usize,
    /// Only components with at least one entry appear
    pub components: BTreeMap<Component, ComponentStats>,
    /// Entry with the greatest timestamp; earliest stored wins a tie
    pub latest: Option<LogEntry>,
}

fn slot(component: Component) -> usize {
    match component {
        Component::Battery => 0,
        Component::Motor => 1,
        Component::Gps => 2,
    }
}

/// Summarize entries in one pass
pub fn summarize(entries: &[LogEntry]) -> Summary {
    let mut running: [Option<RunningStats>; 3] = [None; 3];
    let mut latest: Option<LogEntry> = None;

    for entry in entries {
        match &mut running[slot(entry.component)] {
            Some(stats) => stats.push(entry.value),
            empty => *empty = Some(RunningStats::new(entry.value)),
        }

        // Strict comparison keeps the first entry seen at the max timestamp
        if latest.map_or(true, |l| entry.timestamp > l.timestamp) {
            latest = Some(*entry);
        }
    }

    let components = Component::ALL
        .into_iter()
        .filter_map(|c| running[slot(c)].map(|stats| (c, stats.finish())))
        .collect();

    Summary {
        count: entries.len(),
        components,
        latest,
    }
}

/// Summarize the store under a single read lock
pub fn summarize_store(store: &LogStore) -> Result<Summary, StorageError> {
    let summary = store.read(summarize)?;
    debug!(
        count = summary.count,
        components = summary.components.len(),
        "Computed log summary"
    );
    Ok(summary)
}
