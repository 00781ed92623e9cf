//! Extraction Configuration

use crate::error::FeatureError;
use serde::{Deserialize, Serialize};

/// Default anomaly band half-width, in standard deviations
pub const DEFAULT_SIGMA_MULTIPLIER: f64 = 2.0;

/// Default number of widest peaks averaged into the max-peak-width metric
pub const DEFAULT_TOP_K: usize = 1;

/// Default absolute prominence threshold for the prominent-peak count
///
/// This is a threshold in the same units as the input data, so it assumes
/// a known input scale; tune it per data source.
pub const DEFAULT_PROMINENCE_THRESHOLD: f64 = 40.0;

/// Configuration for one extraction call
///
/// Passed explicitly to each call; there is no process-wide or
/// constructor-bound state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Anomaly band half-width, in standard deviations (must be > 0)
    pub sigma_multiplier: f64,
    /// How many of the widest peaks are averaged into the max-peak-width
    /// metric (must be > 0)
    pub top_k: usize,
    /// Absolute prominence threshold for the prominent-peak count, in
    /// input data units
    pub prominence_threshold: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sigma_multiplier: DEFAULT_SIGMA_MULTIPLIER,
            top_k: DEFAULT_TOP_K,
            prominence_threshold: DEFAULT_PROMINENCE_THRESHOLD,
        }
    }
}

impl FeatureConfig {
    /// Check the configuration invariants
    pub fn validate(&self) -> Result<(), FeatureError> {
        if !(self.sigma_multiplier > 0.0) {
            return Err(FeatureError::InvalidConfig(format!(
                "sigma_multiplier must be > 0, got {}",
                self.sigma_multiplier
            )));
        }
        if self.top_k == 0 {
            return Err(FeatureError::InvalidConfig(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
