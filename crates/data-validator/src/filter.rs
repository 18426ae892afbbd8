//! Speed Filter for Spike Rejection and Gap Interpolation

use crate::error::ValidationError;
use crate::normalizer::CleanSample;
use serde::{Deserialize, Serialize};

/// Plausible speed band (km/h)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Readings below this are treated as dropouts and interpolated
    pub min_speed: f64,
    /// Readings above this are spikes; the whole sample is discarded
    pub max_speed: f64,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            min_speed: 40.0,
            max_speed: 150.0,
        }
    }
}

impl CleanerConfig {
    /// Reject non-finite or inverted bounds
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.min_speed.is_finite()
            || !self.max_speed.is_finite()
            || self.min_speed > self.max_speed
        {
            return Err(ValidationError::InvalidSpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        Ok(())
    }
}

/// Outcome counters of one filter pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub spikes_removed: usize,
    pub clamped: usize,
    pub interpolated: usize,
}

/// Applies the speed band to an ordered run of samples
pub struct SpeedFilter {
    config: CleanerConfig,
}

impl SpeedFilter {
    /// Create a new speed filter with given band
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    /// Current band
    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Drop every sample whose speed exceeds the upper bound.
    ///
    /// Removal is sample-wide: battery, temperature and position of a spiking
    /// sample are lost along with its speed.
    pub fn reject_spikes(&self, samples: &mut Vec<CleanSample>) -> usize {
        let before = samples.len();
        let max = self.config.max_speed;
        samples.retain(|s| s.speed.map_or(true, |v| v <= max));
        before - samples.len()
    }

    /// Lift readings below the lower bound using their immediate neighbours.
    ///
    /// Neighbours are taken from the slice as given, i.e. after spike
    /// rejection, and always with their pre-interpolation speeds. The first
    /// and last samples have one neighbour only and are clamped instead. A
    /// null neighbour counts as the lower bound. The mean is floored at the
    /// lower bound so every non-null output speed stays inside the band.
    pub fn interpolate_gaps(&self, samples: &mut [CleanSample]) -> FilterStats {
        let min = self.config.min_speed;
        let speeds: Vec<Option<f64>> = samples.iter().map(|s| s.speed).collect();
        let last = samples.len().saturating_sub(1);
        let mut stats = FilterStats::default();

        for (i, sample) in samples.iter_mut().enumerate() {
            match speeds[i] {
                Some(speed) if speed < min => {}
                _ => continue,
            }

            if i == 0 || i == last {
                sample.speed = Some(min);
                stats.clamped += 1;
                continue;
            }

            let prev = speeds[i - 1].unwrap_or(min);
            let next = speeds[i + 1].unwrap_or(min);
            sample.speed = Some(((prev + next) / 2.0).max(min));
            stats.interpolated += 1;
        }

        stats
    }

    /// Spike rejection followed by gap interpolation
    pub fn apply(&self, samples: &mut Vec<CleanSample>) -> FilterStats {
        let spikes_removed = self.reject_spikes(samples);
        let stats = self.interpolate_gaps(samples);
        FilterStats {
            spikes_removed,
            ..stats
        }
    }
}

impl Default for SpeedFilter {
    fn default() -> Self {
        Self::new(CleanerConfig::default())
    }
}
