//! Dashboard Readout
//!
//! Projection of a cleaned run into what a speed chart and its headline
//! tiles need.

use crate::normalizer::CleanSample;
use serde::{Deserialize, Serialize};

/// Default motor temperature above which the dashboard raises an alert (°C)
pub const DEFAULT_MOTOR_TEMP_ALERT: f64 = 90.0;

/// One plotted point of the speed series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedPoint {
    pub timestamp: f64,
    pub speed: f64,
}

/// Headline values plus chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReadout {
    /// Most recent cleaned sample
    pub latest: Option<CleanSample>,
    /// Latest motor temperature strictly above the threshold
    pub motor_temp_alert: bool,
    /// Samples with a known speed, in input order
    pub speed_series: Vec<SpeedPoint>,
}

impl DashboardReadout {
    pub fn from_samples(samples: &[CleanSample], motor_temp_alert: f64) -> Self {
        let latest = samples.last().copied();
        let alert = latest
            .and_then(|s| s.motor_temp)
            .is_some_and(|t| t > motor_temp_alert);

        let speed_series = samples
            .iter()
            .filter_map(|s| {
                s.speed.map(|speed| SpeedPoint {
                    timestamp: s.timestamp,
                    speed,
                })
            })
            .collect();

        Self {
            latest,
            motor_temp_alert: alert,
            speed_series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: f64, speed: Option<f64>, motor_temp: Option<f64>) -> CleanSample {
        CleanSample {
            timestamp,
            speed,
            battery: None,
            motor_temp,
            gps: None,
        }
    }

    #[test]
    fn test_series_skips_null_speed() {
        let samples = [
            sample(1.0, Some(50.0), None),
            sample(2.0, None, None),
            sample(3.0, Some(70.0), Some(80.0)),
        ];
        let readout = DashboardReadout::from_samples(&samples, DEFAULT_MOTOR_TEMP_ALERT);
        assert_eq!(readout.speed_series.len(), 2);
        assert_eq!(readout.latest.map(|s| s.timestamp), Some(3.0));
        assert!(!readout.motor_temp_alert);
    }

    #[test]
    fn test_motor_temp_alert_is_strict() {
        let at = [sample(1.0, None, Some(90.0))];
        assert!(!DashboardReadout::from_samples(&at, 90.0).motor_temp_alert);

        let above = [sample(1.0, None, Some(90.5))];
        assert!(DashboardReadout::from_samples(&above, 90.0).motor_temp_alert);
    }

    #[test]
    fn test_empty_run() {
        let readout = DashboardReadout::from_samples(&[], DEFAULT_MOTOR_TEMP_ALERT);
        assert!(readout.latest.is_none());
        assert!(readout.speed_series.is_empty());
        assert!(!readout.motor_temp_alert);
    }
}
