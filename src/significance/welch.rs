// Welch's unequal-variance t-test
//
// Scientific Foundation:
// - Welch, B. L. (1947). The generalization of "Student's" problem when
//   several different population variances are involved. Biometrika 34.
// - Degrees of freedom from the Welch-Satterthwaite equation; may be fractional.
//
// Prover configurations differ wildly in spread (a local direct call vs. an
// MPC-TLS session through a remote notary), so equal variances are never assumed.

use crate::stats::{mean, sample_variance};
use anyhow::Result;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of Welch's t-test between two samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchTest {
    /// (mean_a - mean_b) / standard error; infinite when both samples are constant and differ
    pub t_statistic: f64,

    /// Two-sided p-value in [0, 1]
    pub p_value: f64,

    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,

    pub mean_a: f64,
    pub mean_b: f64,

    /// Sample variances (n - 1 divisor)
    pub variance_a: f64,
    pub variance_b: f64,
}

/// Compare two samples using Welch's t-test
///
/// # Arguments
/// * `a` - First sample (e.g. total durations of one prover group)
/// * `b` - Second sample
///
/// # Example
/// ```
/// use prover_benchstats::significance::welch_t_test;
///
/// let fast = [10.0, 12.0, 11.0, 13.0, 10.0];
/// let slow = [25.0, 27.0, 26.0, 28.0, 25.0];
///
/// let result = welch_t_test(&fast, &slow).unwrap();
/// assert!(result.p_value < 0.05);
/// assert!(result.t_statistic < 0.0);
/// ```
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<WelchTest> {
    if a.is_empty() || b.is_empty() {
        anyhow::bail!("Cannot compare empty distributions");
    }

    if a.len() < 2 || b.len() < 2 {
        anyhow::bail!("Need at least 2 samples per distribution for t-test");
    }

    let (n_a, n_b) = (a.len() as f64, b.len() as f64);
    let (mean_a, mean_b) = (mean(a), mean(b));
    let (variance_a, variance_b) = (sample_variance(a), sample_variance(b));

    let se2_a = variance_a / n_a;
    let se2_b = variance_b / n_b;
    let se2 = se2_a + se2_b;

    let (t_statistic, p_value, df) = if se2 == 0.0 {
        // Both samples constant: identical means are indistinguishable, different means are certain
        let df = n_a + n_b - 2.0;
        if mean_a == mean_b {
            (0.0, 1.0, df)
        } else {
            let t = if mean_a > mean_b {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
            (t, 0.0, df)
        }
    } else {
        let t = (mean_a - mean_b) / se2.sqrt();
        let df = se2 * se2 / (se2_a * se2_a / (n_a - 1.0) + se2_b * se2_b / (n_b - 1.0));
        (t, two_sided_p_value(t, df), df)
    };

    Ok(WelchTest {
        t_statistic,
        p_value,
        df,
        mean_a,
        mean_b,
        variance_a,
        variance_b,
    })
}

/// P(|T| >= |t|) for Student's t with `df` degrees of freedom
///
/// Computed from the lower tail so tiny p-values keep their precision.
fn two_sided_p_value(t: f64, df: f64) -> f64 {
    if t.is_nan() {
        return 1.0;
    }
    if t.is_infinite() {
        return 0.0;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.cdf(-t.abs())).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}
