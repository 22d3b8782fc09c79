//! prover-benchstats - statistical analysis of prover benchmark results
//!
//! Benchmark runs are recorded as JSON lines, one per run. This library
//! groups runs by prover configuration, summarizes durations and byte
//! counts with confidence intervals and sample-adequacy checks, and
//! compares groups pairwise with Welch's t-test and Cohen's d.
//!
//! Pipeline: [`record`] parses lines, [`aggregate`] folds them per group,
//! [`view::analyze`] computes an [`view::AnalysisReport`] and the
//! `*_output` modules render it.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod input;
pub mod json_output;
pub mod prover;
pub mod record;
pub mod report_output;
pub mod significance;
pub mod stats;
pub mod view;
