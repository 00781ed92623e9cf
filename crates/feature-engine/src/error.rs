//! Feature Extraction Error Types

use thiserror::Error;

/// Errors during feature extraction
#[derive(Debug, Clone, Error)]
pub enum FeatureError {
    /// The table has no numeric cells, so every statistic is undefined.
    /// Unlike a single undefined ratio, the whole record would be
    /// meaningless, so this fails instead of producing NaN-filled rows.
    #[error("{file}: table has no numeric cells, statistics are undefined")]
    EmptyTable { file: String },

    /// A configuration invariant was violated
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
