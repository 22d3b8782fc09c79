// Standardized effect size (Cohen's d)
//
// Cohen, J. (1988). Statistical Power Analysis for the Behavioral Sciences.
// Conventional bands: 0.2 small, 0.5 medium, 0.8 large.

use crate::stats::{mean, sample_variance};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cohen's d with the pooled standard deviation sqrt((var_a + var_b) / 2)
///
/// Returns 0 when both samples have zero variance.
pub fn cohens_d(a: &[f64], b: &[f64]) -> f64 {
    let pooled_std = ((sample_variance(a) + sample_variance(b)) / 2.0).sqrt();
    if pooled_std > 0.0 {
        (mean(a) - mean(b)) / pooled_std
    } else {
        0.0
    }
}

/// Magnitude band of an effect size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSize {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectSize {
    /// Band for `d` (sign ignored)
    pub fn classify(d: f64) -> Self {
        let magnitude = d.abs();
        if magnitude < 0.2 {
            Self::Negligible
        } else if magnitude < 0.5 {
            Self::Small
        } else if magnitude < 0.8 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohens_d_known_value() {
        // means 2.5 and 4.5, both variances 5/3
        let d = cohens_d(&[1.0, 2.0, 3.0, 4.0], &[3.0, 4.0, 5.0, 6.0]);
        let expected = -2.0 / (5.0_f64 / 3.0).sqrt();
        assert!((d - expected).abs() < 1e-12);
    }

    #[test]
    fn test_cohens_d_zero_variance() {
        assert_eq!(cohens_d(&[5.0, 5.0], &[7.0, 7.0]), 0.0);
    }

    #[test]
    fn test_cohens_d_sign() {
        assert!(cohens_d(&[10.0, 11.0, 12.0], &[1.0, 2.0, 3.0]) > 0.0);
    }

    #[test]
    fn test_bands() {
        assert_eq!(EffectSize::classify(0.0), EffectSize::Negligible);
        assert_eq!(EffectSize::classify(0.19), EffectSize::Negligible);
        assert_eq!(EffectSize::classify(0.2), EffectSize::Small);
        assert_eq!(EffectSize::classify(-0.49), EffectSize::Small);
        assert_eq!(EffectSize::classify(0.5), EffectSize::Medium);
        assert_eq!(EffectSize::classify(0.79), EffectSize::Medium);
        assert_eq!(EffectSize::classify(0.8), EffectSize::Large);
        assert_eq!(EffectSize::classify(-3.0), EffectSize::Large);
    }

    #[test]
    fn test_display() {
        assert_eq!(EffectSize::Medium.to_string(), "medium");
    }
}
