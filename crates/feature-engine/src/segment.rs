//! Anomaly-Band Segmentation
//!
//! Flags rows with cells outside a sigma band around the table-wide mean
//! and partitions the table into contiguous inter-anomaly row ranges.

use crate::statistics::SampleStats;
use signal_table::Table;
use tracing::debug;

/// Contiguous row range `[start_row, end_row)` between two consecutive
/// anomalous rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// First row of the range (an anomalous row)
    pub start_row: usize,
    /// One past the last row of the range (the next anomalous row)
    pub end_row: usize,
}

/// Partition `table` into inter-anomaly segments
///
/// The mean and population standard deviation are taken over all present
/// cells of the table, not per column. A row is anomalous when any of its
/// cells lies strictly outside `[mean - k·σ, mean + k·σ]`.
///
/// Fewer than two anomalous rows yield no segments; that is the normal
/// outcome for clean data, not an error. The ranges before the first
/// anomaly and after the last one are not segments.
pub fn segment(table: &Table, sigma_multiplier: f64) -> Vec<Segment> {
    let flat = table.flatten();
    if flat.is_empty() {
        return Vec::new();
    }

    let stats = SampleStats::compute(&flat);
    let upper = stats.mean + sigma_multiplier * stats.std_dev;
    let lower = stats.mean - sigma_multiplier * stats.std_dev;

    let anomalous: Vec<usize> = (0..table.n_rows())
        .filter(|&row| table.row_values(row).any(|v| v < lower || v > upper))
        .collect();

    debug!(
        "{} anomalous rows outside [{lower:.3}, {upper:.3}]",
        anomalous.len()
    );

    anomalous
        .windows(2)
        .map(|pair| Segment {
            start_row: pair[0],
            end_row: pair[1],
        })
        .collect()
}
