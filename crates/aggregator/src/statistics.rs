//! Component Statistics

use serde::{Deserialize, Serialize};

/// Min, max, mean and count of one component's values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: usize,
}

/// Streaming accumulator behind [`ComponentStats`]
#[derive(Debug, Clone, Copy)]
pub struct RunningStats {
    min: f64,
    max: f64,
    sum: f64,
    count: usize,
}

impl RunningStats {
    /// Start from a first observed value
    pub fn new(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            sum: value,
            count: 1,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    pub fn finish(&self) -> ComponentStats {
        ComponentStats {
            min: self.min,
            max: self.max,
            avg: self.sum / self.count as f64,
            count: self.count,
        }
    }

    /// Fold a slice; `None` when empty
    pub fn compute(values: &[f64]) -> Option<ComponentStats> {
        let (first, rest) = values.split_first()?;
        let mut stats = Self::new(*first);
        for &v in rest {
            stats.push(v);
        }
        Some(stats.finish())
    }
}
