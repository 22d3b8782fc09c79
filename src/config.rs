//! Analysis configuration
//!
//! Defaults reproduce the thresholds used by previously published reports.
//! All fields may be set from a TOML file:
//!
//! ```toml
//! confidence_level = 0.99
//! min_adequate_samples = 10
//! skip_malformed = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for summary statistics, sample adequacy and ingestion
///
/// # Example
/// ```
/// use prover_benchstats::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.confidence_level, 0.95);
/// assert!(!config.skip_malformed);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Confidence level for every t-based confidence interval
    pub confidence_level: f64,

    /// Minimum observations before a sample can be called adequate
    pub min_adequate_samples: usize,

    /// Maximum coefficient of variation (percent) for an adequate sample
    pub max_cv_pct: f64,

    /// Maximum CI width, as percent of the mean, for an adequate sample
    pub max_ci_width_pct: f64,

    /// Full CI width (percent of mean) targeted by the sample-size estimate
    pub target_ci_width_pct: f64,

    /// Skip malformed lines with a warning instead of aborting the run
    ///
    /// Off by default: dropping lines silently changes sample sizes.
    pub skip_malformed: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            min_adequate_samples: 5,
            max_cv_pct: 30.0,
            max_ci_width_pct: 40.0,
            target_ci_width_pct: 10.0,
            skip_malformed: false,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            ));
        }

        if self.min_adequate_samples < 2 {
            return Err(format!(
                "min_adequate_samples must be >= 2, got {}",
                self.min_adequate_samples
            ));
        }

        for (name, value) in [
            ("max_cv_pct", self.max_cv_pct),
            ("max_ci_width_pct", self.max_ci_width_pct),
            ("target_ci_width_pct", self.target_ci_width_pct),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(format!("{} must be a positive number, got {}", name, value));
            }
        }

        Ok(())
    }
}
