//! Batch Analysis
//!
//! Runs the three feature-engine metric groups over every file of a batch
//! and joins them by file identifier into one combined record set.

use feature_engine::{
    amplitude_metrics, distribution_metrics, peak_metrics, AmplitudeMetrics, DistributionMetrics,
    FeatureConfig, FeatureError, FeatureRecord, PeakMetrics,
};
use signal_table::Table;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, info};

/// Errors aborting a batch
#[derive(Debug, Error)]
pub enum BatchError {
    /// A file identifier occurs more than once in the batch
    #[error("duplicate file identifier in batch: {0}")]
    DuplicateFile(String),

    /// A file is present in one metric group but missing from another.
    /// The groups are derived from the same per-file computation, so a
    /// divergence is a pipeline bug and the batch must not be merged.
    #[error("inconsistent batch: {file} is missing from the {group} metric group")]
    InconsistentBatch { file: String, group: &'static str },

    /// A per-file computation failed
    #[error(transparent)]
    Computation(#[from] FeatureError),
}

/// Analyze a batch of `(file_id, table)` pairs
///
/// Each file's three metric groups are computed independently, joined by
/// file identifier, and returned ordered by it. Any per-file failure
/// aborts the whole batch with the offending file named.
pub fn analyze(
    files: &[(String, Table)],
    cfg: &FeatureConfig,
) -> Result<Vec<FeatureRecord>, BatchError> {
    cfg.validate()?;

    let mut seen = HashSet::new();
    for (file_id, _) in files {
        if !seen.insert(file_id.as_str()) {
            return Err(BatchError::DuplicateFile(file_id.clone()));
        }
    }

    let amplitude: Vec<AmplitudeMetrics> = files
        .iter()
        .map(|(id, table)| amplitude_metrics(table, id))
        .collect::<Result<_, _>>()?;
    let peaks: Vec<PeakMetrics> = files
        .iter()
        .map(|(id, table)| peak_metrics(table, id, cfg))
        .collect::<Result<_, _>>()?;
    let distribution: Vec<DistributionMetrics> = files
        .iter()
        .map(|(id, table)| distribution_metrics(table, id))
        .collect::<Result<_, _>>()?;

    let records = merge_groups(amplitude, peaks, distribution)?;
    info!("analyzed {} trace files", records.len());
    Ok(records)
}

/// Inner-join the three metric groups by file identifier
///
/// Every file must appear in all three groups exactly once; anything else
/// is a fatal batch inconsistency, never a silently dropped row. Output is
/// ordered by file identifier ascending.
pub fn merge_groups(
    amplitude: Vec<AmplitudeMetrics>,
    peaks: Vec<PeakMetrics>,
    distribution: Vec<DistributionMetrics>,
) -> Result<Vec<FeatureRecord>, BatchError> {
    let mut peaks_by_file: HashMap<String, PeakMetrics> = HashMap::with_capacity(peaks.len());
    for metrics in peaks {
        if let Some(previous) = peaks_by_file.insert(metrics.file.clone(), metrics) {
            return Err(BatchError::DuplicateFile(previous.file));
        }
    }

    let mut distribution_by_file: HashMap<String, DistributionMetrics> =
        HashMap::with_capacity(distribution.len());
    for metrics in distribution {
        if let Some(previous) = distribution_by_file.insert(metrics.file.clone(), metrics) {
            return Err(BatchError::DuplicateFile(previous.file));
        }
    }

    let mut records = Vec::with_capacity(amplitude.len());
    let mut seen = HashSet::new();
    for amp in amplitude {
        if !seen.insert(amp.file.clone()) {
            return Err(BatchError::DuplicateFile(amp.file));
        }

        let peak = peaks_by_file
            .remove(&amp.file)
            .ok_or_else(|| BatchError::InconsistentBatch {
                file: amp.file.clone(),
                group: "peak",
            })?;
        let dist = distribution_by_file.remove(&amp.file).ok_or_else(|| {
            BatchError::InconsistentBatch {
                file: amp.file.clone(),
                group: "distribution",
            }
        })?;

        debug!("merged metric groups for {}", amp.file);
        records.push(FeatureRecord {
            file: amp.file,
            std_dev: amp.std_dev,
            crest_factor: amp.crest_factor,
            impact_factor: amp.impact_factor,
            shape_factor: amp.shape_factor,
            max_peak_width: peak.max_peak_width,
            prominent_peak_count: peak.prominent_peak_count,
            skewness: dist.skewness,
            kurtosis: dist.kurtosis,
        });
    }

    // Files only the other groups know about are just as inconsistent
    if let Some(file) = peaks_by_file.into_keys().next() {
        return Err(BatchError::InconsistentBatch {
            file,
            group: "amplitude",
        });
    }
    if let Some(file) = distribution_by_file.into_keys().next() {
        return Err(BatchError::InconsistentBatch {
            file,
            group: "amplitude",
        });
    }

    records.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(records)
}
