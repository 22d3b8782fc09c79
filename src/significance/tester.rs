// Pairwise comparison of all prover groups

use crate::aggregate::ProverAggregate;
use crate::significance::effect_size::{cohens_d, EffectSize};
use crate::significance::welch::welch_t_test;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Groups with fewer successful runs are left out of the comparison set
pub const MIN_SAMPLES_PER_GROUP: usize = 2;

/// One pairwise comparison of total durations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceResult {
    /// "A vs B"
    pub comparison: String,
    pub group_a: String,
    pub group_b: String,
    /// Welch t-statistic; clamped to ±f64::MAX when both groups are constant and differ
    pub t_statistic: f64,
    /// Two-sided p-value in [0, 1]
    pub p_value: f64,
    pub cohens_d: f64,
    pub significant_005: bool,
    pub significant_001: bool,
}

impl SignificanceResult {
    pub fn effect_size(&self) -> EffectSize {
        EffectSize::classify(self.cohens_d)
    }
}

/// Run Welch's t-test and Cohen's d over every unordered pair of eligible groups
///
/// Pairs are emitted in key order: for keys `A < B < C` the result is
/// `A vs B`, `A vs C`, `B vs C`. Groups with fewer than
/// [`MIN_SAMPLES_PER_GROUP`] successful runs produce no entries at all.
pub fn run_pairwise_tests(groups: &BTreeMap<String, ProverAggregate>) -> Vec<SignificanceResult> {
    let eligible: Vec<(&String, &ProverAggregate)> = groups
        .iter()
        .filter(|(_, group)| group.total_durations.len() >= MIN_SAMPLES_PER_GROUP)
        .collect();

    let pairs: Vec<(usize, usize)> = (0..eligible.len())
        .flat_map(|i| (i + 1..eligible.len()).map(move |j| (i, j)))
        .collect();

    pairs
        .par_iter()
        .filter_map(|&(i, j)| {
            let (name_a, group_a) = eligible[i];
            let (name_b, group_b) = eligible[j];
            compare_groups(name_a, group_a, name_b, group_b)
        })
        .collect()
}

fn compare_groups(
    name_a: &str,
    group_a: &ProverAggregate,
    name_b: &str,
    group_b: &ProverAggregate,
) -> Option<SignificanceResult> {
    let test = match welch_t_test(&group_a.total_durations, &group_b.total_durations) {
        Ok(test) => test,
        Err(e) => {
            tracing::warn!("Failed to compare {} and {}: {}", name_a, name_b, e);
            return None;
        }
    };

    Some(SignificanceResult {
        comparison: format!("{} vs {}", name_a, name_b),
        group_a: name_a.to_string(),
        group_b: name_b.to_string(),
        t_statistic: test.t_statistic.clamp(-f64::MAX, f64::MAX),
        p_value: test.p_value,
        cohens_d: cohens_d(&group_a.total_durations, &group_b.total_durations),
        significant_005: test.p_value < 0.05,
        significant_001: test.p_value < 0.01,
    })
}
