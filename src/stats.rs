//! Descriptive statistics for benchmark series
//!
//! Every summary carries a Student's t confidence interval and a
//! sample-adequacy verdict. Degenerate series (empty, single value, zero
//! variance, zero mean) yield well-formed numbers rather than NaN.

use crate::config::AnalysisConfig;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// z-score used by the sample-size recommendation (95% normal approximation)
const RECOMMENDATION_Z: f64 = 1.96;

/// Immutable snapshot of a numeric series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 divisor)
    pub std: f64,
    /// Standard error of the mean
    pub sem: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// Coefficient of variation, percent
    pub cv: f64,
    /// Full CI width as percent of the mean
    pub ci_width_pct: f64,
    pub adequate_sample: bool,
}

/// Summarize `data` with the default configuration (95% CI, standard thresholds)
///
/// # Example
/// ```
/// use prover_benchstats::stats::compute_stats;
///
/// let summary = compute_stats(&[100.0, 102.0, 98.0, 101.0, 99.0]);
/// assert_eq!(summary.n, 5);
/// assert_eq!(summary.mean, 100.0);
/// assert!(summary.adequate_sample);
/// ```
pub fn compute_stats(data: &[f64]) -> StatSummary {
    compute_stats_with(data, &AnalysisConfig::default())
}

/// Summarize `data` using the confidence level and thresholds from `config`
pub fn compute_stats_with(data: &[f64], config: &AnalysisConfig) -> StatSummary {
    if data.is_empty() {
        return StatSummary::default();
    }

    let n = data.len();
    let mean = mean(data);
    let std = if n > 1 { sample_variance(data).sqrt() } else { 0.0 };
    let sem = std / (n as f64).sqrt();

    let (ci_lower, ci_upper) = confidence_interval(mean, sem, n, config.confidence_level);

    let cv = if mean > 0.0 { std / mean * 100.0 } else { 0.0 };
    let ci_width_pct = if mean > 0.0 {
        (ci_upper - ci_lower) / mean * 100.0
    } else {
        100.0
    };
    let adequate_sample = n >= config.min_adequate_samples
        && cv < config.max_cv_pct
        && ci_width_pct < config.max_ci_width_pct;

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    StatSummary {
        n,
        mean,
        std,
        sem,
        ci_lower,
        ci_upper,
        min: sorted[0],
        max: sorted[n - 1],
        median: median_of_sorted(&sorted),
        cv,
        ci_width_pct,
        adequate_sample,
    }
}

/// Summarize an integer series (byte counts)
pub fn compute_stats_u64(data: &[u64], config: &AnalysisConfig) -> StatSummary {
    let values: Vec<f64> = data.iter().map(|&v| v as f64).collect();
    compute_stats_with(&values, config)
}

/// Arithmetic mean (0 for an empty slice)
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Bessel-corrected variance (0 for fewer than two values)
pub fn sample_variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let squares: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    squares / (data.len() - 1) as f64
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Two-sided Student's t critical value for `df` degrees of freedom
///
/// `None` unless `df` is positive and `confidence` lies in (0, 1).
pub fn t_critical_value(df: f64, confidence: f64) -> Option<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some(dist.inverse_cdf(0.5 + confidence / 2.0))
}

/// Two-sided t interval; collapses to the mean when there is no spread
fn confidence_interval(mean: f64, sem: f64, n: usize, confidence: f64) -> (f64, f64) {
    if n < 2 || sem == 0.0 {
        return (mean, mean);
    }
    match t_critical_value((n - 1) as f64, confidence) {
        Some(t) => (mean - t * sem, mean + t * sem),
        None => (mean, mean),
    }
}

impl StatSummary {
    /// Estimated observations needed for the CI to shrink to the target width
    ///
    /// Only offered for inadequate samples with positive spread and mean;
    /// never below the configured adequacy minimum.
    pub fn recommended_sample_size(&self, config: &AnalysisConfig) -> Option<usize> {
        if self.adequate_sample || self.std <= 0.0 || self.mean <= 0.0 {
            return None;
        }
        let target_half_width = self.mean * config.target_ci_width_pct / 100.0 / 2.0;
        let estimate = ((RECOMMENDATION_Z * self.std / target_half_width).powi(2)).ceil();
        Some((estimate as usize).max(config.min_adequate_samples))
    }

    /// Human-readable reasons the adequacy check failed (empty when adequate)
    pub fn inadequacy_reasons(&self, config: &AnalysisConfig) -> Vec<String> {
        let mut reasons = Vec::new();
        if self.adequate_sample {
            return reasons;
        }
        if self.n < config.min_adequate_samples {
            reasons.push(format!("n={} < {}", self.n, config.min_adequate_samples));
        }
        if self.cv >= config.max_cv_pct {
            reasons.push(format!("CV={:.1}% >= {}%", self.cv, config.max_cv_pct));
        }
        if self.ci_width_pct >= config.max_ci_width_pct {
            reasons.push(format!(
                "CI width={:.1}% >= {}% of mean",
                self.ci_width_pct, config.max_ci_width_pct
            ));
        }
        reasons
    }
}
