//! Telemetry Cleaning Pipeline
//!
//! normalize -> drop missing timestamps -> reject speed spikes -> interpolate
//! low-speed gaps. Input order is kept; samples are expected in ascending
//! timestamp order and are never sorted here.

use crate::filter::{CleanerConfig, SpeedFilter};
use crate::normalizer::{normalize, CleanSample, RawSample};
use tracing::debug;

/// Counters describing what one cleaning pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub received: usize,
    pub missing_timestamp: usize,
    pub spikes_removed: usize,
    pub clamped: usize,
    pub interpolated: usize,
}

impl CleanStats {
    /// Samples removed from the output for any reason
    pub fn dropped(&self) -> usize {
        self.missing_timestamp + self.spikes_removed
    }
}

/// Lossy, infallible cleaner for raw telemetry samples
#[derive(Default)]
pub struct Cleaner {
    filter: SpeedFilter,
}

impl Cleaner {
    /// Create a cleaner with the given speed band
    pub fn new(config: CleanerConfig) -> Self {
        Self {
            filter: SpeedFilter::new(config),
        }
    }

    /// Current speed band
    pub fn config(&self) -> &CleanerConfig {
        self.filter.config()
    }

    /// Clean a run of samples
    pub fn clean(&self, raw: &[RawSample]) -> Vec<CleanSample> {
        self.clean_with_stats(raw).0
    }

    /// Clean a run of samples and report what was dropped or rewritten
    pub fn clean_with_stats(&self, raw: &[RawSample]) -> (Vec<CleanSample>, CleanStats) {
        let mut samples: Vec<CleanSample> = raw
            .iter()
            .filter_map(|r| normalize(r).into_clean())
            .collect();

        let missing_timestamp = raw.len() - samples.len();
        let filtered = self.filter.apply(&mut samples);

        let stats = CleanStats {
            received: raw.len(),
            missing_timestamp,
            spikes_removed: filtered.spikes_removed,
            clamped: filtered.clamped,
            interpolated: filtered.interpolated,
        };
        debug!(
            received = stats.received,
            kept = samples.len(),
            missing_timestamp = stats.missing_timestamp,
            spikes = stats.spikes_removed,
            interpolated = stats.interpolated,
            clamped = stats.clamped,
            "Cleaned telemetry samples"
        );

        (samples, stats)
    }
}

/// Clean with the default 40-150 km/h band
pub fn clean(raw: &[RawSample]) -> Vec<CleanSample> {
    Cleaner::default().clean(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn samples(value: Value) -> Vec<RawSample> {
        value
            .as_array()
            .map(|a| a.iter().map(RawSample::from_value).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_drops_missing_timestamps() {
        let raw = samples(json!([
            { "timestamp": 1, "speed": 60 },
            { "timestamp": "garbage", "speed": 61 },
            { "speed": 62 },
            { "timestamp": null, "speed": 63 },
            { "timestamp": "4", "speed": 64 }
        ]));

        let (out, stats) = Cleaner::default().clean_with_stats(&raw);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].timestamp, 1.0);
        assert_eq!(out[1].timestamp, 4.0);
        assert_eq!(stats.missing_timestamp, 3);
        assert_eq!(stats.dropped(), 3);
    }

    #[test]
    fn test_spike_sample_is_gone_entirely() {
        let raw = samples(json!([
            { "timestamp": 1, "speed": 60, "battery": 90 },
            { "timestamp": 2, "speed": 200, "battery": 89, "motorTemp": 70 },
            { "timestamp": 3, "speed": 70, "battery": 88 }
        ]));

        let out = clean(&raw);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.timestamp != 2.0));
        assert!(out.iter().all(|s| s.battery != Some(89.0)));
    }

    #[test]
    fn test_timestamp_drop_changes_adjacency() {
        // The dropped middle sample is not a neighbour of 20
        let raw = samples(json!([
            { "timestamp": 1, "speed": 60 },
            { "timestamp": "?", "speed": 140 },
            { "timestamp": 3, "speed": 20 },
            { "timestamp": 4, "speed": 80 }
        ]));
        let speeds: Vec<_> = clean(&raw).iter().map(|s| s.speed).collect();
        assert_eq!(speeds, vec![Some(60.0), Some(70.0), Some(80.0)]);
    }

    #[test]
    fn test_custom_band() {
        let cleaner = Cleaner::new(CleanerConfig {
            min_speed: 10.0,
            max_speed: 50.0,
        });
        let raw = samples(json!([
            { "timestamp": 1, "speed": 5 },
            { "timestamp": 2, "speed": 60 },
            { "timestamp": 3, "speed": 30 }
        ]));
        let speeds: Vec<_> = cleaner.clean(&raw).iter().map(|s| s.speed).collect();
        assert_eq!(speeds, vec![Some(10.0), Some(30.0)]);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let raw = samples(json!([
            { "timestamp": 1, "speed": "12", "battery": "99%", "gps": { "lat": 1, "lng": 2 } },
            { "timestamp": 2, "speed": 60, "motorTemp": "71.5C" },
            { "timestamp": 3, "speed": 5 },
            { "timestamp": 4, "speed": 400 },
            { "timestamp": 5, "speed": null },
            { "timestamp": 6, "speed": 90 }
        ]));

        let once = clean(&raw);
        let again: Vec<RawSample> = once.iter().map(RawSample::from).collect();
        assert_eq!(clean(&again), once);
    }

    #[test]
    fn test_empty_input() {
        assert!(clean(&[]).is_empty());
    }
}
