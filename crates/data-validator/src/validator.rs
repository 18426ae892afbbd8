//! Log Entry Validator
//!
//! Strict schema check for uploaded component logs. Unlike the cleaner this
//! path never coerces: a timestamp sent as a string is a failure, not a
//! number.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Closed set of components that may report log values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Battery,
    Motor,
    Gps,
}

impl Component {
    /// Every component, in reporting order
    pub const ALL: [Component; 3] = [Component::Battery, Component::Motor, Component::Gps];

    pub fn as_str(self) -> &'static str {
        match self {
            Component::Battery => "battery",
            Component::Motor => "motor",
            Component::Gps => "gps",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "battery" => Some(Component::Battery),
            "motor" => Some(Component::Motor),
            "gps" => Some(Component::Gps),
            _ => None,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated log entry, immutable once stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: u64,
    pub component: Component,
    pub value: f64,
}

/// A rejected entry with every rule it broke
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFailure {
    /// Position in the submitted batch
    pub index: usize,
    /// The entry exactly as submitted
    pub entry: Value,
    pub errors: Vec<ValidationError>,
}

impl EntryFailure {
    /// All failing rules joined into one message
    pub fn reason(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Partition of a batch into accepted and rejected entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub valid: Vec<LogEntry>,
    pub invalid: Vec<EntryFailure>,
}

impl ValidationResult {
    /// True when the batch may be committed as a whole
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Schema validator for component log batches
#[derive(Debug, Default, Clone, Copy)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a single timestamp
    pub fn validate_timestamp(&self, value: Option<&Value>) -> Result<u64, ValidationError> {
        match value {
            Some(Value::Number(n)) => positive_integer(n).ok_or(ValidationError::InvalidTimestamp),
            _ => Err(ValidationError::InvalidTimestamp),
        }
    }

    /// Validate a single reading
    pub fn validate_value(&self, value: Option<&Value>) -> Result<f64, ValidationError> {
        value
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .ok_or(ValidationError::InvalidValue)
    }

    /// Validate a component name
    pub fn validate_component(&self, value: Option<&Value>) -> Result<Component, ValidationError> {
        value
            .and_then(Value::as_str)
            .and_then(Component::parse)
            .ok_or(ValidationError::InvalidComponent)
    }

    /// Check every rule on one entry, collecting all failures.
    ///
    /// A non-object entry simply has none of its fields and fails every rule.
    pub fn validate_entry(&self, entry: &Value) -> Result<LogEntry, Vec<ValidationError>> {
        let timestamp = self.validate_timestamp(entry.get("timestamp"));
        let value = self.validate_value(entry.get("value"));
        let component = self.validate_component(entry.get("component"));

        match (timestamp, value, component) {
            (Ok(timestamp), Ok(value), Ok(component)) => Ok(LogEntry {
                timestamp,
                component,
                value,
            }),
            (timestamp, value, component) => Err([timestamp.err(), value.err(), component.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }

    /// Partition a batch, preserving submitted order on both sides
    pub fn validate_batch(&self, entries: &[Value]) -> ValidationResult {
        let mut result = ValidationResult::default();

        for (index, entry) in entries.iter().enumerate() {
            match self.validate_entry(entry) {
                Ok(valid) => result.valid.push(valid),
                Err(errors) => result.invalid.push(EntryFailure {
                    index,
                    entry: entry.clone(),
                    errors,
                }),
            }
        }

        result
    }
}

/// Integral and strictly positive, whether sent as `5` or `5.0`
fn positive_integer(n: &Number) -> Option<u64> {
    if let Some(t) = n.as_u64() {
        return (t > 0).then_some(t);
    }
    if n.is_i64() {
        return None;
    }
    let f = n.as_f64()?;
    (f > 0.0 && f.fract() == 0.0 && f < u64::MAX as f64).then(|| f as u64)
}
