//! Peak Detection
//!
//! Locates strict local maxima in a 1-D sequence and computes, for each,
//! its topographic prominence and its width at half-prominence.

/// One detected local maximum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakRecord {
    /// Sample index of the maximum
    pub position: usize,
    /// Vertical drop from the peak to the higher of its two bases
    pub prominence: f64,
    /// Width at half-prominence, in sample units with intersample linear
    /// interpolation
    pub width: f64,
}

/// Find all strict local maxima with their prominences and widths
///
/// A position `i` is a peak when `seq[i] > seq[i-1]` and
/// `seq[i] > seq[i+1]`; plateaus are not peaks. Sequences with no interior
/// points yield no peaks. Output is ordered by position.
pub fn find_peaks(seq: &[f64]) -> Vec<PeakRecord> {
    let n = seq.len();
    if n < 3 {
        return Vec::new();
    }

    let mut peaks = Vec::new();
    for i in 1..n - 1 {
        if seq[i] > seq[i - 1] && seq[i] > seq[i + 1] {
            let (prominence, left_base, right_base) = prominence_at(seq, i);
            let width = width_at(seq, i, prominence, left_base, right_base);
            peaks.push(PeakRecord {
                position: i,
                prominence,
                width,
            });
        }
    }
    peaks
}

/// Topographic prominence of the peak at `peak`
///
/// Walk outward in each direction until the signal exceeds the peak or the
/// border is hit; the base on each side is the lowest sample encountered.
/// Prominence is the drop from the peak to the higher of the two bases.
fn prominence_at(seq: &[f64], peak: usize) -> (f64, usize, usize) {
    let height = seq[peak];

    let mut left_min = height;
    let mut left_base = peak;
    let mut i = peak;
    while i > 0 {
        i -= 1;
        if seq[i] > height {
            break;
        }
        if seq[i] < left_min {
            left_min = seq[i];
            left_base = i;
        }
    }

    let mut right_min = height;
    let mut right_base = peak;
    let mut i = peak;
    while i < seq.len() - 1 {
        i += 1;
        if seq[i] > height {
            break;
        }
        if seq[i] < right_min {
            right_min = seq[i];
            right_base = i;
        }
    }

    (height - left_min.max(right_min), left_base, right_base)
}

/// Width of the peak at the evaluation height `peak - 0.5 * prominence`
///
/// From the peak, walk toward each base while the signal stays above the
/// evaluation height, then interpolate the fractional crossing between the
/// last two samples. The crossings are clipped at the bases.
fn width_at(seq: &[f64], peak: usize, prominence: f64, left_base: usize, right_base: usize) -> f64 {
    let height = seq[peak] - 0.5 * prominence;

    let mut i = peak;
    while left_base < i && height < seq[i] {
        i -= 1;
    }
    let mut left_ip = i as f64;
    if seq[i] < height {
        left_ip += (height - seq[i]) / (seq[i + 1] - seq[i]);
    }

    let mut i = peak;
    while i < right_base && height < seq[i] {
        i += 1;
    }
    let mut right_ip = i as f64;
    if seq[i] < height {
        right_ip -= (height - seq[i]) / (seq[i - 1] - seq[i]);
    }

    right_ip - left_ip
}
