//! Per-group accumulation of benchmark records
//!
//! Records are folded into one [`ProverAggregate`] per group key. Accumulators
//! are created on first sight of a key and never removed; round accumulators
//! are nested inside their group and addressed by round index.

use crate::config::AnalysisConfig;
use crate::record::{RawRecord, RecordError};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fatal ingestion failures
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {source}")]
    Malformed {
        path: String,
        line: usize,
        #[source]
        source: RecordError,
    },
}

/// Measurements of one round index across all runs of a group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundAggregate {
    pub durations: Vec<f64>,
    pub request_bytes: Vec<u64>,
    pub response_bytes: Vec<u64>,
}

/// Running accumulator for one group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProverAggregate {
    pub success_count: u64,
    pub failure_count: u64,
    /// One entry per successful record
    pub total_durations: Vec<f64>,
    /// Only records that reported a non-zero setup time
    pub setup_times: Vec<f64>,
    /// Every round duration of every record, flattened
    pub all_round_durations: Vec<f64>,
    pub rounds: BTreeMap<u32, RoundAggregate>,
}

impl ProverAggregate {
    /// Fold one record into this accumulator
    ///
    /// A record flagged successful but carrying no results counts as a failure.
    pub fn record(&mut self, record: &RawRecord) {
        let results = match (&record.results, record.success) {
            (Some(results), true) => results,
            _ => {
                self.failure_count += 1;
                return;
            }
        };

        self.success_count += 1;
        self.total_durations.push(results.total_duration_ms);

        // Zero counts as "not reported"; historical reports were computed this way.
        if let Some(setup) = results.setup_time_ms.filter(|&ms| ms != 0.0) {
            self.setup_times.push(setup);
        }

        for round in &results.rounds {
            let entry = self.rounds.entry(round.round).or_default();
            entry.durations.push(round.duration_ms);
            entry.request_bytes.push(round.request_bytes);
            entry.response_bytes.push(round.response_bytes);
            self.all_round_durations.push(round.duration_ms);
        }
    }

    /// Total number of records folded into this group
    pub fn total_runs(&self) -> u64 {
        self.success_count + self.failure_count
    }
}

/// Line contents without the trailing `\n` / `\r\n`
fn decode_line(bytes: &[u8]) -> Result<&str, RecordError> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(RecordError::Encoding)
}

/// Counts for one ingested source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub lines: usize,
    pub records: usize,
    pub skipped: usize,
}

/// Folds records from any number of sources into per-group accumulators
#[derive(Debug, Default)]
pub struct Aggregator {
    groups: BTreeMap<String, ProverAggregate>,
    skip_malformed: bool,
    skipped_lines: usize,
}

impl Aggregator {
    /// Create a strict aggregator (malformed input aborts ingestion)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator honouring `config.skip_malformed`
    pub fn with_config(config: &AnalysisConfig) -> Self {
        Self {
            skip_malformed: config.skip_malformed,
            ..Self::default()
        }
    }

    /// Fold one parsed record
    pub fn ingest(&mut self, record: &RawRecord) {
        let key = record.prover.group_key();
        let group = self.groups.entry(key).or_insert_with_key(|key| {
            debug!(group = %key, "new prover group");
            ProverAggregate::default()
        });
        group.record(record);
    }

    /// Parse and fold one line; blank lines are ignored
    ///
    /// Returns `Ok(true)` when a record was ingested.
    pub fn ingest_line(&mut self, line: &str) -> Result<bool, RecordError> {
        if line.trim().is_empty() {
            return Ok(false);
        }
        let record = RawRecord::from_json_line(line)?;
        self.ingest(&record);
        Ok(true)
    }

    /// Fold every line of `reader`; `source` names it in diagnostics
    ///
    /// Lines that are not valid UTF-8 are malformed records, not I/O failures.
    pub fn ingest_reader<R: BufRead>(
        &mut self,
        source: &str,
        mut reader: R,
    ) -> Result<IngestSummary, IngestError> {
        let mut summary = IngestSummary::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| IngestError::Io {
                    path: source.to_string(),
                    source: e,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;
            summary.lines += 1;

            let outcome = decode_line(&buf).and_then(|line| self.ingest_line(line));
            match outcome {
                Ok(true) => summary.records += 1,
                Ok(false) => {}
                Err(e) if self.skip_malformed => {
                    warn!("Skipping malformed record at {}:{}: {}", source, line_no, e);
                    summary.skipped += 1;
                    self.skipped_lines += 1;
                }
                Err(e) => {
                    return Err(IngestError::Malformed {
                        path: source.to_string(),
                        line: line_no,
                        source: e,
                    })
                }
            }
        }

        info!(
            source,
            lines = summary.lines,
            records = summary.records,
            skipped = summary.skipped,
            "ingested benchmark file"
        );
        Ok(summary)
    }

    /// Open and fold a JSONL file
    pub fn ingest_file<P: AsRef<Path>>(&mut self, path: P) -> Result<IngestSummary, IngestError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| IngestError::Io {
            path: display.clone(),
            source: e,
        })?;
        self.ingest_reader(&display, BufReader::new(file))
    }

    /// Accumulators keyed by group, in lexicographic key order
    pub fn groups(&self) -> &BTreeMap<String, ProverAggregate> {
        &self.groups
    }

    pub fn into_groups(self) -> BTreeMap<String, ProverAggregate> {
        self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Lines dropped in lenient mode across all sources
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn success(prover: &str, total: f64, setup: Option<f64>, rounds: &str) -> String {
        let setup = setup
            .map(|s| format!(r#","setup_time_ms":{}"#, s))
            .unwrap_or_default();
        format!(
            r#"{{"prover":{},"success":true,"results":{{"total_duration_ms":{}{},"rounds":[{}]}}}}"#,
            prover, total, setup, rounds
        )
    }

    const DIRECT: &str = r#"{"Direct":{}}"#;

    #[test]
    fn test_success_and_failure_counts() {
        let mut agg = Aggregator::new();
        agg.ingest_line(&success(DIRECT, 100.0, None, "")).unwrap();
        agg.ingest_line(&success(DIRECT, 110.0, None, "")).unwrap();
        agg.ingest_line(r#"{"prover":{"Direct":{}},"success":false}"#)
            .unwrap();

        let group = &agg.groups()["Direct"];
        assert_eq!(group.success_count, 2);
        assert_eq!(group.failure_count, 1);
        assert_eq!(group.total_durations, vec![100.0, 110.0]);
        assert_eq!(group.total_runs(), 3);
    }

    #[test]
    fn test_zero_setup_time_is_absent() {
        let mut agg = Aggregator::new();
        agg.ingest_line(&success(DIRECT, 100.0, Some(0.0), "")).unwrap();
        agg.ingest_line(&success(DIRECT, 100.0, Some(25.0), "")).unwrap();
        agg.ingest_line(&success(DIRECT, 100.0, None, "")).unwrap();

        assert_eq!(agg.groups()["Direct"].setup_times, vec![25.0]);
    }

    #[test]
    fn test_rounds_are_grouped_by_index() {
        let rounds = r#"{"round":1,"duration_ms":10,"request_bytes":100,"response_bytes":1000},
                        {"round":2,"duration_ms":20,"request_bytes":200,"response_bytes":2000}"#;
        let mut agg = Aggregator::new();
        agg.ingest_line(&success(DIRECT, 30.0, None, rounds)).unwrap();
        agg.ingest_line(&success(DIRECT, 31.0, None, rounds)).unwrap();

        let group = &agg.groups()["Direct"];
        assert_eq!(group.rounds.len(), 2);
        assert_eq!(group.rounds[&1].durations, vec![10.0, 10.0]);
        assert_eq!(group.rounds[&2].request_bytes, vec![200, 200]);
        assert_eq!(group.rounds[&2].response_bytes, vec![2000, 2000]);
        assert_eq!(group.all_round_durations, vec![10.0, 20.0, 10.0, 20.0]);
    }

    #[test]
    fn test_failure_results_are_ignored() {
        let mut agg = Aggregator::new();
        agg.ingest_line(
            r#"{"prover":{"Direct":{}},"success":false,"results":{"total_duration_ms":5,"rounds":[{"round":1,"duration_ms":5,"request_bytes":1,"response_bytes":1}]}}"#,
        )
        .unwrap();

        let group = &agg.groups()["Direct"];
        assert_eq!(group.failure_count, 1);
        assert!(group.total_durations.is_empty());
        assert!(group.rounds.is_empty());
        assert!(group.all_round_durations.is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let mut agg = Aggregator::new();
        assert!(!agg.ingest_line("   ").unwrap());
        assert!(agg.is_empty());
    }

    #[test]
    fn test_reader_reports_line_of_malformed_record() {
        let input = format!("{}\n\n{{broken\n", success(DIRECT, 1.0, None, ""));
        let mut agg = Aggregator::new();
        let err = agg
            .ingest_reader("bench.jsonl", Cursor::new(input))
            .unwrap_err();

        match err {
            IngestError::Malformed { path, line, .. } => {
                assert_eq!(path, "bench.jsonl");
                assert_eq!(line, 3);
            }
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_message_names_location() {
        let mut agg = Aggregator::new();
        let err = agg
            .ingest_reader("a.jsonl", Cursor::new("{\"success\":true}\n"))
            .unwrap_err();
        assert!(err.to_string().starts_with("a.jsonl:1:"));
    }

    #[test]
    fn test_lenient_mode_skips_malformed() {
        let config = AnalysisConfig {
            skip_malformed: true,
            ..AnalysisConfig::default()
        };
        let input = format!(
            "{}\nnot json\n{}\n",
            success(DIRECT, 1.0, None, ""),
            success(DIRECT, 2.0, None, "")
        );
        let mut agg = Aggregator::with_config(&config);
        let summary = agg.ingest_reader("x", Cursor::new(input)).unwrap();

        assert_eq!(summary.records, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(agg.skipped_lines(), 1);
        assert_eq!(agg.groups()["Direct"].success_count, 2);
    }

    fn invalid_utf8_input() -> Vec<u8> {
        let mut input = Vec::new();
        input.extend_from_slice(success(DIRECT, 1.0, None, "").as_bytes());
        input.extend_from_slice(b"\n{\"prover\":\xff}\n");
        input.extend_from_slice(success(DIRECT, 2.0, None, "").as_bytes());
        input.extend_from_slice(b"\r\n");
        input
    }

    #[test]
    fn test_invalid_utf8_is_malformed_with_location() {
        let mut agg = Aggregator::new();
        let err = agg
            .ingest_reader("bad.jsonl", Cursor::new(invalid_utf8_input()))
            .unwrap_err();

        match &err {
            IngestError::Malformed { line, source, .. } => {
                assert_eq!(*line, 2);
                assert!(matches!(source, RecordError::Encoding(_)));
            }
            other => panic!("expected Malformed, got {:?}", other),
        }
        assert!(err.to_string().starts_with("bad.jsonl:2:"));
    }

    #[test]
    fn test_lenient_mode_skips_invalid_utf8() {
        let config = AnalysisConfig {
            skip_malformed: true,
            ..AnalysisConfig::default()
        };
        let mut agg = Aggregator::with_config(&config);
        let summary = agg
            .ingest_reader("bad.jsonl", Cursor::new(invalid_utf8_input()))
            .unwrap();

        assert_eq!(summary.lines, 3);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(agg.groups()["Direct"].total_durations, vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_file() {
        let mut agg = Aggregator::new();
        let err = agg.ingest_file("/nonexistent/bench.jsonl").unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn test_groups_are_sorted() {
        let mut agg = Aggregator::new();
        agg.ingest_line(&success(r#"{"TlsPerMessage":{"notary":{"domain":"n.x"}}}"#, 1.0, None, ""))
            .unwrap();
        agg.ingest_line(&success(DIRECT, 1.0, None, "")).unwrap();
        agg.ingest_line(&success(r#"{"Proxy":{"proxy":{"host":"p.x"}}}"#, 1.0, None, ""))
            .unwrap();

        let keys: Vec<_> = agg.groups().keys().cloned().collect();
        assert_eq!(keys, vec!["Direct", "Proxy (p)", "TlsPerMessage (n)"]);
    }
}
