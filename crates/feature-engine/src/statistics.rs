//! Statistical Descriptors

/// Closed-form statistics over one flattened sample population
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStats {
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Root mean square
    pub rms: f64,
    /// Maximum value
    pub max: f64,
    /// Third standardized moment; undefined for zero-variance data
    pub skewness: Option<f64>,
    /// Excess kurtosis (fourth standardized moment minus 3); undefined for
    /// zero-variance data
    pub kurtosis: Option<f64>,
}

impl SampleStats {
    /// Compute statistics from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;

        let mean = values.iter().sum::<f64>() / n;
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        // Central moments and the raw second moment in one pass
        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;
        let mut sum_sq = 0.0;

        for &v in values {
            let d = v - mean;
            m2 += d * d;
            m3 += d * d * d;
            m4 += d * d * d * d;
            sum_sq += v * v;
        }

        let variance = m2 / n;
        let std_dev = variance.sqrt();
        let rms = (sum_sq / n).sqrt();

        // Skewness: E[(X-μ)³] / σ³
        let skewness = if std_dev > 0.0 {
            Some((m3 / n) / (std_dev * std_dev * std_dev))
        } else {
            None
        };

        // Kurtosis: E[(X-μ)⁴] / σ⁴ - 3 (excess kurtosis)
        let kurtosis = if std_dev > 0.0 {
            Some((m4 / n) / (variance * variance) - 3.0)
        } else {
            None
        };

        Self {
            mean,
            std_dev,
            rms,
            max,
            skewness,
            kurtosis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_computation() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = SampleStats::compute(&values);
        assert!((stats.mean - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_population_std_dev() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = SampleStats::compute(&values);
        // Population std dev of this dataset is exactly 2
        assert!((stats.std_dev - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_rms_and_max() {
        let values = vec![-3.0, 4.0];
        let stats = SampleStats::compute(&values);
        assert!((stats.rms - (12.5f64).sqrt()).abs() < 1e-9);
        assert!((stats.max - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_data_has_undefined_moments() {
        let values = vec![7.0; 16];
        let stats = SampleStats::compute(&values);
        assert_eq!(stats.std_dev, 0.0);
        assert!(stats.skewness.is_none());
        assert!(stats.kurtosis.is_none());
    }

    #[test]
    fn test_symmetric_data_has_zero_skewness() {
        let values = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
        let stats = SampleStats::compute(&values);
        assert!(stats.skewness.unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_excess_kurtosis_of_two_point_distribution() {
        // Equal-weight two-point distribution has kurtosis 1, excess -2
        let values = vec![-1.0, 1.0, -1.0, 1.0];
        let stats = SampleStats::compute(&values);
        assert!((stats.kurtosis.unwrap() + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_values() {
        let stats = SampleStats::compute(&[]);
        assert_eq!(stats.mean, 0.0);
        assert!(stats.skewness.is_none());
    }
}
