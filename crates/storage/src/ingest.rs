//! Batch Ingestion
//!
//! Validate-then-commit: a batch either lands in the store in full or not at
//! all.

use crate::{LogStore, StorageError};
use data_validator::{EntryFailure, Validator};
use serde_json::Value;
use tracing::{info, warn};

/// Result of submitting one batch
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// Every entry was valid and has been appended
    Committed { appended: usize },
    /// At least one entry failed; nothing was appended
    Rejected { failures: Vec<EntryFailure> },
}

/// Commits validated batches into a log store
#[derive(Debug, Default)]
pub struct Ingestor {
    validator: Validator,
}

impl Ingestor {
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    /// Validate `batch` and, only if every entry passes, append it
    pub fn ingest(&self, store: &LogStore, batch: &[Value]) -> Result<IngestOutcome, StorageError> {
        let result = self.validator.validate_batch(batch);

        if !result.is_valid() {
            warn!(
                submitted = batch.len(),
                invalid = result.invalid.len(),
                "Rejected log batch"
            );
            return Ok(IngestOutcome::Rejected {
                failures: result.invalid,
            });
        }

        let appended = store.append_batch(result.valid)?;
        info!(appended, total = store.len(), "Committed log batch");

        Ok(IngestOutcome::Committed { appended })
    }
}
