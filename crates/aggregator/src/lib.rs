//! Log Aggregation
//!
//! Single-pass per-component statistics and latest-entry tracking, recomputed
//! from the store on every request.

mod statistics;
mod summary;

pub use statistics::{ComponentStats, RunningStats};
pub use summary::{summarize, summarize_store, Summary};
