//! Storage Layer
//!
//! Process-lifetime, append-only store for validated component logs, and the
//! ingestor that commits whole batches into it.

mod ingest;
mod store;

pub use ingest::{IngestOutcome, Ingestor};
pub use store::LogStore;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Log store lock poisoned: {0}")]
    LockPoisoned(String),
}
