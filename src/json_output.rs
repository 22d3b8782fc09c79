//! JSON export of analysis results
//!
//! Shape: `{"provers": {<group>: {...}}, "significance_tests": [...]}`.
//! Groups without a single successful run are omitted.

use crate::significance::SignificanceResult;
use crate::view::{AnalysisReport, ProverSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root JSON output structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Per-group statistics, keyed by group
    pub provers: BTreeMap<String, ProverSummary>,
    /// Pairwise Welch's t-test results
    pub significance_tests: Vec<SignificanceResult>,
}

impl JsonOutput {
    /// Build the export from an analysis report
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            provers: report
                .successful_provers()
                .map(|(key, summary)| (key.clone(), summary.clone()))
                .collect(),
            significance_tests: report.significance_tests.clone(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
