//! Synthetic exponential reference curves

use covid_config::ReferenceConfig;

/// Geometric sequence `start * rate^i` for `i` in `0..length`.
pub fn reference_curve(start: f64, rate: f64, length: usize) -> Vec<f64> {
    let mut value = start;
    (0..length)
        .map(|_| {
            let current = value;
            value *= rate;
            current
        })
        .collect()
}

/// Growth-rate benchmark drawn over every per-quantity chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurve {
    pub rate: f64,
    pub length: usize,
    pub label: String,
}

impl ReferenceCurve {
    pub fn new(rate: f64, length: usize, label: impl Into<String>) -> Self {
        Self {
            rate,
            length,
            label: label.into(),
        }
    }

    pub fn from_config(config: &ReferenceConfig) -> Self {
        Self::new(config.rate, config.length, &config.label)
    }

    /// The curve starting at `start`, usually the chart threshold.
    pub fn curve(&self, start: f64) -> Vec<f64> {
        reference_curve(start, self.rate, self.length)
    }

    /// The curve as `(day, value)` points.
    pub fn points(&self, start: f64) -> Vec<(f64, f64)> {
        self.curve(start)
            .into_iter()
            .enumerate()
            .map(|(day, value)| (day as f64, value))
            .collect()
    }
}
