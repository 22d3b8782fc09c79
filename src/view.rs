//! Analysis results handed to the renderers
//!
//! [`analyze`] is the only place statistics are computed; the report, CSV
//! and JSON renderers only format what is in an [`AnalysisReport`].

use crate::aggregate::{ProverAggregate, RoundAggregate};
use crate::config::AnalysisConfig;
use crate::significance::{run_pairwise_tests, SignificanceResult};
use crate::stats::{compute_stats_u64, compute_stats_with, StatSummary};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics for one round index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub duration: StatSummary,
    pub request_bytes: StatSummary,
    pub response_bytes: StatSummary,
}

/// Statistics for one prover group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProverSummary {
    pub success_count: u64,
    pub failure_count: u64,
    pub total_duration: StatSummary,
    /// `None` when no run reported a (non-zero) setup time
    pub setup_time: Option<StatSummary>,
    /// `None` when no round was recorded
    pub avg_round_duration: Option<StatSummary>,
    pub per_round: BTreeMap<u32, RoundSummary>,
}

impl ProverSummary {
    pub fn total_runs(&self) -> u64 {
        self.success_count + self.failure_count
    }

    /// Percentage of successful runs (0 when there were none)
    pub fn success_rate(&self) -> f64 {
        let total = self.total_runs();
        if total == 0 {
            0.0
        } else {
            self.success_count as f64 / total as f64 * 100.0
        }
    }

    pub fn has_successes(&self) -> bool {
        self.success_count > 0
    }
}

/// Complete engine output: per-group summaries plus pairwise tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Keyed by group, lexicographic order
    pub provers: BTreeMap<String, ProverSummary>,
    pub significance_tests: Vec<SignificanceResult>,
}

impl AnalysisReport {
    /// Groups with at least one successful run (the export formats skip the rest)
    pub fn successful_provers(&self) -> impl Iterator<Item = (&String, &ProverSummary)> {
        self.provers.iter().filter(|(_, p)| p.has_successes())
    }
}

/// Compute summaries and significance tests for fully ingested groups
///
/// Per-group work runs in parallel; output order does not depend on scheduling.
pub fn analyze(groups: &BTreeMap<String, ProverAggregate>, config: &AnalysisConfig) -> AnalysisReport {
    let provers = groups
        .par_iter()
        .map(|(key, group)| (key.clone(), summarize_group(group, config)))
        .collect::<BTreeMap<_, _>>();

    AnalysisReport {
        provers,
        significance_tests: run_pairwise_tests(groups),
    }
}

/// Summaries for a single group
pub fn summarize_group(group: &ProverAggregate, config: &AnalysisConfig) -> ProverSummary {
    let optional = |series: &[f64]| {
        if series.is_empty() {
            None
        } else {
            Some(compute_stats_with(series, config))
        }
    };

    ProverSummary {
        success_count: group.success_count,
        failure_count: group.failure_count,
        total_duration: compute_stats_with(&group.total_durations, config),
        setup_time: optional(&group.setup_times),
        avg_round_duration: optional(&group.all_round_durations),
        per_round: group
            .rounds
            .iter()
            .map(|(&index, round)| (index, summarize_round(round, config)))
            .collect(),
    }
}

fn summarize_round(round: &RoundAggregate, config: &AnalysisConfig) -> RoundSummary {
    RoundSummary {
        duration: compute_stats_with(&round.durations, config),
        request_bytes: compute_stats_u64(&round.request_bytes, config),
        response_bytes: compute_stats_u64(&round.response_bytes, config),
    }
}
