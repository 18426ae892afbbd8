//! Telemetry Cleaning and Log Validation
//!
//! Numeric coercion shared by both paths, the lossy sample cleaner that feeds
//! the speed chart, and the strict validator guarding the component log store.

mod chart;
mod cleaner;
mod coerce;
mod error;
mod filter;
mod normalizer;
mod validator;

pub use chart::{DashboardReadout, SpeedPoint, DEFAULT_MOTOR_TEMP_ALERT};
pub use cleaner::{clean, CleanStats, Cleaner};
pub use coerce::{coerce, coerce_opt, parse_leading_float};
pub use error::ValidationError;
pub use filter::{CleanerConfig, FilterStats, SpeedFilter};
pub use normalizer::{normalize, CleanSample, GpsFix, NormalizedSample, RawSample};
pub use validator::{Component, EntryFailure, LogEntry, ValidationResult, Validator};
