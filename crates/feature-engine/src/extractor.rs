//! Feature Extraction Orchestration
//!
//! Composes the statistical descriptors, the anomaly segmenter, and the
//! peak finder into one feature record per table. The three metric groups
//! are separable so a batch layer can compute and join them independently.

use crate::config::FeatureConfig;
use crate::error::FeatureError;
use crate::peaks::find_peaks;
use crate::segment::segment;
use crate::statistics::SampleStats;
use serde::{Deserialize, Serialize};
use signal_table::Table;
use tracing::debug;

/// Amplitude-domain metric group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeMetrics {
    /// File identifier
    pub file: String,
    /// Population standard deviation
    pub std_dev: f64,
    /// max / rms; undefined when rms is zero
    pub crest_factor: Option<f64>,
    /// max / mean; undefined when the mean is zero
    pub impact_factor: Option<f64>,
    /// rms / mean; undefined when the mean is zero
    pub shape_factor: Option<f64>,
}

/// Anomaly-driven peak metric group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakMetrics {
    /// File identifier
    pub file: String,
    /// Mean of the `top_k` widest peak widths found inside inter-anomaly
    /// segments; zero when there are no segments or no peaks
    pub max_peak_width: f64,
    /// Whole-file peaks whose prominence reaches the configured threshold
    pub prominent_peak_count: usize,
}

/// Distribution-shape metric group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionMetrics {
    /// File identifier
    pub file: String,
    /// Third standardized moment; undefined for zero-variance data
    pub skewness: Option<f64>,
    /// Excess kurtosis; undefined for zero-variance data
    pub kurtosis: Option<f64>,
}

/// The combined per-file output row
///
/// Undefined metrics are `None` at the type level; they become NaN text
/// only at the presentation edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "File Name")]
    pub file: String,
    #[serde(rename = "Standard Deviation")]
    pub std_dev: f64,
    #[serde(rename = "Crest Factor")]
    pub crest_factor: Option<f64>,
    #[serde(rename = "Impact Factor")]
    pub impact_factor: Option<f64>,
    #[serde(rename = "Shape Factor")]
    pub shape_factor: Option<f64>,
    #[serde(rename = "Max Peak Width")]
    pub max_peak_width: f64,
    #[serde(rename = "Peak Prominence Count")]
    pub prominent_peak_count: usize,
    #[serde(rename = "Skewness")]
    pub skewness: Option<f64>,
    #[serde(rename = "Kurtosis")]
    pub kurtosis: Option<f64>,
}

fn nonempty_flat(table: &Table, file_id: &str) -> Result<Vec<f64>, FeatureError> {
    let flat = table.flatten();
    if flat.is_empty() {
        return Err(FeatureError::EmptyTable {
            file: file_id.to_string(),
        });
    }
    Ok(flat)
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Compute the amplitude-domain group for one table
pub fn amplitude_metrics(table: &Table, file_id: &str) -> Result<AmplitudeMetrics, FeatureError> {
    let flat = nonempty_flat(table, file_id)?;
    let stats = SampleStats::compute(&flat);

    Ok(AmplitudeMetrics {
        file: file_id.to_string(),
        std_dev: stats.std_dev,
        crest_factor: ratio(stats.max, stats.rms),
        impact_factor: ratio(stats.max, stats.mean),
        shape_factor: ratio(stats.rms, stats.mean),
    })
}

/// Compute the anomaly-driven peak group for one table
pub fn peak_metrics(
    table: &Table,
    file_id: &str,
    cfg: &FeatureConfig,
) -> Result<PeakMetrics, FeatureError> {
    let flat = nonempty_flat(table, file_id)?;

    let segments = segment(table, cfg.sigma_multiplier);
    if segments.is_empty() {
        debug!("{file_id}: no inter-anomaly segments, peak metrics are zero");
        return Ok(PeakMetrics {
            file: file_id.to_string(),
            max_peak_width: 0.0,
            prominent_peak_count: 0,
        });
    }

    // Pool every peak width across all segments, widest first
    let mut widths: Vec<f64> = Vec::new();
    for seg in &segments {
        let section = table.flatten_rows(seg.start_row, seg.end_row);
        widths.extend(find_peaks(&section).iter().map(|p| p.width));
    }
    widths.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let top = &widths[..cfg.top_k.min(widths.len())];
    let max_peak_width = if top.is_empty() {
        0.0
    } else {
        top.iter().sum::<f64>() / top.len() as f64
    };

    // The prominence count scans the whole file, not the segments
    let prominent_peak_count = find_peaks(&flat)
        .iter()
        .filter(|p| p.prominence > 0.0 && p.prominence >= cfg.prominence_threshold)
        .count();

    debug!(
        "{file_id}: {} segments, {} pooled widths, {} prominent peaks",
        segments.len(),
        widths.len(),
        prominent_peak_count
    );

    Ok(PeakMetrics {
        file: file_id.to_string(),
        max_peak_width,
        prominent_peak_count,
    })
}

/// Compute the distribution-shape group for one table
pub fn distribution_metrics(
    table: &Table,
    file_id: &str,
) -> Result<DistributionMetrics, FeatureError> {
    let flat = nonempty_flat(table, file_id)?;
    let stats = SampleStats::compute(&flat);

    Ok(DistributionMetrics {
        file: file_id.to_string(),
        skewness: stats.skewness,
        kurtosis: stats.kurtosis,
    })
}

/// Compute all three metric groups and assemble the combined record
pub fn extract(
    table: &Table,
    file_id: &str,
    cfg: &FeatureConfig,
) -> Result<FeatureRecord, FeatureError> {
    cfg.validate()?;

    let amplitude = amplitude_metrics(table, file_id)?;
    let peaks = peak_metrics(table, file_id, cfg)?;
    let distribution = distribution_metrics(table, file_id)?;

    Ok(FeatureRecord {
        file: amplitude.file,
        std_dev: amplitude.std_dev,
        crest_factor: amplitude.crest_factor,
        impact_factor: amplitude.impact_factor,
        shape_factor: amplitude.shape_factor,
        max_peak_width: peaks.max_peak_width,
        prominent_peak_count: peaks.prominent_peak_count,
        skewness: distribution.skewness,
        kurtosis: distribution.kurtosis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn single_column(values: &[f64]) -> Table {
        Table::from_rows(
            vec!["ch1".to_string()],
            values.iter().map(|&v| vec![Some(v)]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_constant_data() {
        let table = single_column(&[5.0; 20]);
        let record = extract(&table, "flat.csv", &FeatureConfig::default()).unwrap();

        assert_eq!(record.std_dev, 0.0);
        assert!(record.skewness.is_none());
        assert!(record.kurtosis.is_none());
        assert_eq!(record.prominent_peak_count, 0);
        assert_eq!(record.max_peak_width, 0.0);
        // rms and mean are both 5, so every ratio is defined and 1
        assert!((record.crest_factor.unwrap() - 1.0).abs() < 1e-12);
        assert!((record.shape_factor.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_mean_ratios_undefined() {
        let table = single_column(&[-1.0, 1.0, -1.0, 1.0]);
        let record = extract(&table, "sym.csv", &FeatureConfig::default()).unwrap();

        assert!(record.impact_factor.is_none());
        assert!(record.shape_factor.is_none());
        // rms is 1, so the crest factor stays finite
        assert!((record.crest_factor.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let table = Table::from_rows(vec!["ch1".to_string()], vec![]).unwrap();
        let err = extract(&table, "empty.csv", &FeatureConfig::default()).unwrap_err();
        match err {
            FeatureError::EmptyTable { file } => assert_eq!(file, "empty.csv"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_all_missing_table_is_an_error() {
        let table = Table::from_rows(
            vec!["ch1".to_string()],
            vec![vec![None], vec![None]],
        )
        .unwrap();
        assert!(matches!(
            amplitude_metrics(&table, "gaps.csv"),
            Err(FeatureError::EmptyTable { .. })
        ));
    }

    #[test]
    fn test_clean_file_reports_zero_peak_metrics() {
        // Mild oscillation, nothing outside 2 sigma twice
        let table = single_column(&[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        let peaks = peak_metrics(&table, "clean.csv", &FeatureConfig::default()).unwrap();
        assert_eq!(peaks.max_peak_width, 0.0);
        assert_eq!(peaks.prominent_peak_count, 0);
    }

    #[test]
    fn test_outlier_file_reports_segment_peaks() {
        // Two extreme rows bound a segment containing one clear bump
        let mut values = vec![0.0; 4];
        values.push(1000.0);
        values.extend([0.0, 10.0, 0.0]);
        values.push(-1000.0);
        values.extend([0.0; 4]);
        let table = single_column(&values);

        let cfg = FeatureConfig {
            prominence_threshold: 5.0,
            ..Default::default()
        };
        let peaks = peak_metrics(&table, "outlier.csv", &cfg).unwrap();

        // The bump at row 6 lies between the two anomalies
        assert!(peaks.max_peak_width > 0.0);
        assert!(peaks.prominent_peak_count >= 1);
    }

    #[test]
    fn test_top_k_averages_available_widths() {
        // Segment with two bumps of width 1; top_k larger than the pool
        let values = [500.0, 0.0, 1.0, 0.0, 1.0, 0.0, 500.0];
        let table = single_column(&values);
        let cfg = FeatureConfig {
            sigma_multiplier: 1.0,
            top_k: 10,
            ..Default::default()
        };
        let peaks = peak_metrics(&table, "bumps.csv", &cfg).unwrap();
        assert!((peaks.max_peak_width - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let table = single_column(&[1.0, 2.0, 3.0]);
        let cfg = FeatureConfig {
            sigma_multiplier: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            extract(&table, "x.csv", &cfg),
            Err(FeatureError::InvalidConfig(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_extract_is_idempotent(
            values in prop::collection::vec(-1000.0f64..1000.0, 3..100)
        ) {
            let table = single_column(&values);
            let cfg = FeatureConfig::default();
            let first = extract(&table, "trace.csv", &cfg).unwrap();
            let second = extract(&table, "trace.csv", &cfg).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_peaks_are_interior_with_positive_prominence(
            values in prop::collection::vec(-100.0f64..100.0, 0..64)
        ) {
            let peaks = find_peaks(&values);
            for peak in &peaks {
                prop_assert!(peak.position > 0);
                prop_assert!(peak.position + 1 < values.len());
                prop_assert!(peak.prominence > 0.0);
                prop_assert!(peak.width >= 0.0);
            }
        }
    }
}
