//! Validation Error Types

use thiserror::Error;

/// A single failed rule on a submitted log entry, or a rejected cleaner setting.
///
/// The rule variants render as the human readable reasons reported back to
/// the uploader, so their messages are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Timestamp missing, fractional, or not strictly positive
    #[error("timestamp must be a positive integer")]
    InvalidTimestamp,

    /// Value missing, not a JSON number, or not finite
    #[error("value must be a valid finite number")]
    InvalidValue,

    /// Component outside the closed set
    #[error("component must be one of: battery, motor, gps")]
    InvalidComponent,

    /// Cleaner speed bounds are unusable
    #[error("speed range [{min}, {max}] is invalid")]
    InvalidSpeedRange { min: f64, max: f64 },
}
