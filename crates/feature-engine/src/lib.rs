//! Feature Engineering Engine
//!
//! Statistical descriptors and anomaly-driven peak analysis, producing one
//! feature record per signal table.

mod config;
mod error;
mod extractor;
mod peaks;
mod segment;
mod statistics;

pub use config::FeatureConfig;
pub use error::FeatureError;
pub use extractor::{
    amplitude_metrics, distribution_metrics, extract, peak_metrics, AmplitudeMetrics,
    DistributionMetrics, FeatureRecord, PeakMetrics,
};
pub use peaks::{find_peaks, PeakRecord};
pub use segment::{segment, Segment};
pub use statistics::SampleStats;
