//! Sample Normalization
//!
//! Maps untrusted telemetry samples onto numeric-or-null fields.

use crate::coerce::{coerce, coerce_opt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Telemetry sample as received from the device, every field untrusted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSample {
    pub timestamp: Value,
    pub speed: Value,
    pub battery: Value,
    #[serde(rename = "motorTemp")]
    pub motor_temp: Value,
    /// Expected shape `{ lat, lng }`, but may be anything
    pub gps: Value,
}

impl RawSample {
    /// Build a sample from any JSON value.
    ///
    /// Objects contribute whichever known fields they carry; any other value
    /// yields an all-null sample, which the cleaner later drops for lacking
    /// a timestamp.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).cloned().unwrap_or(Value::Null);
        Self {
            timestamp: field("timestamp"),
            speed: field("speed"),
            battery: field("battery"),
            motor_temp: field("motorTemp"),
            gps: field("gps"),
        }
    }
}

/// Position fix, only ever fully populated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub lat: f64,
    pub lng: f64,
}

/// Cleaned, chart-ready sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanSample {
    pub timestamp: f64,
    pub speed: Option<f64>,
    pub battery: Option<f64>,
    pub motor_temp: Option<f64>,
    pub gps: Option<GpsFix>,
}

impl From<&CleanSample> for RawSample {
    fn from(sample: &CleanSample) -> Self {
        let num = |v: Option<f64>| v.map_or(Value::Null, Value::from);
        Self {
            timestamp: Value::from(sample.timestamp),
            speed: num(sample.speed),
            battery: num(sample.battery),
            motor_temp: num(sample.motor_temp),
            gps: sample.gps.map_or(Value::Null, |fix| {
                serde_json::json!({ "lat": fix.lat, "lng": fix.lng })
            }),
        }
    }
}

/// Sample after coercion, before the timestamp requirement is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSample {
    pub timestamp: Option<f64>,
    pub speed: Option<f64>,
    pub battery: Option<f64>,
    pub motor_temp: Option<f64>,
    pub gps: Option<GpsFix>,
}

impl NormalizedSample {
    /// Promote to a clean sample; `None` when the timestamp did not coerce.
    pub fn into_clean(self) -> Option<CleanSample> {
        let timestamp = self.timestamp?;
        Some(CleanSample {
            timestamp,
            speed: self.speed,
            battery: self.battery,
            motor_temp: self.motor_temp,
            gps: self.gps,
        })
    }
}

/// Coerce every field of a raw sample.
pub fn normalize(raw: &RawSample) -> NormalizedSample {
    let lat = coerce_opt(raw.gps.get("lat"));
    let lng = coerce_opt(raw.gps.get("lng"));

    NormalizedSample {
        timestamp: coerce(&raw.timestamp),
        speed: coerce(&raw.speed),
        battery: coerce(&raw.battery),
        motor_temp: coerce(&raw.motor_temp),
        gps: match (lat, lng) {
            (Some(lat), Some(lng)) => Some(GpsFix { lat, lng }),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_strings_and_nulls() {
        let raw = RawSample::from_value(&json!({
            "timestamp": "1700000000000",
            "speed": "88.5km/h",
            "battery": null,
            "motorTemp": "hot",
            "gps": { "lat": "51.5", "lng": -0.12 }
        }));

        let n = normalize(&raw);
        assert_eq!(n.timestamp, Some(1_700_000_000_000.0));
        assert_eq!(n.speed, Some(88.5));
        assert_eq!(n.battery, None);
        assert_eq!(n.motor_temp, None);
        assert_eq!(n.gps, Some(GpsFix { lat: 51.5, lng: -0.12 }));
    }

    #[test]
    fn test_partial_gps_is_null() {
        let raw = RawSample::from_value(&json!({
            "timestamp": 1,
            "gps": { "lat": 51.5, "lng": "n/a" }
        }));
        assert_eq!(normalize(&raw).gps, None);

        let raw = RawSample::from_value(&json!({ "timestamp": 1, "gps": "51.5,-0.12" }));
        assert_eq!(normalize(&raw).gps, None);
    }

    #[test]
    fn test_non_object_sample_has_no_timestamp() {
        let raw = RawSample::from_value(&json!(42));
        assert!(normalize(&raw).into_clean().is_none());
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let raw: RawSample = serde_json::from_value(json!({ "timestamp": 5 })).unwrap();
        assert_eq!(raw.speed, Value::Null);
        assert_eq!(raw.gps, Value::Null);
    }
}
