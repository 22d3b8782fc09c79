//! Benchmark result records (one JSON object per line)
//!
//! Wire format:
//!
//! ```json
//! {"prover": {"Direct": {}}, "success": true,
//!  "results": {"total_duration_ms": 1234, "setup_time_ms": 200,
//!              "rounds": [{"round": 1, "duration_ms": 500,
//!                          "request_bytes": 1024, "response_bytes": 4096}]}}
//! ```
//!
//! Producers write additional fields (timestamp, provider, model, ...);
//! they are ignored here.

use crate::prover::ProverDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Reasons a single line cannot be turned into a [`RawRecord`]
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line is not valid UTF-8: {0}")]
    Encoding(std::str::Utf8Error),

    #[error("successful record is missing `results`")]
    MissingResults,

    #[error("invalid `results` payload: {0}")]
    InvalidResults(serde_json::Error),

    #[error("invalid prover descriptor: {0}")]
    InvalidProver(String),
}

/// Per-round measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEntry {
    /// Round number (1-indexed by the benchmark runner)
    pub round: u32,
    pub duration_ms: f64,
    pub request_bytes: u64,
    pub response_bytes: u64,
}

/// Measurements of a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    pub total_duration_ms: f64,
    /// Time from benchmark start to the first request
    #[serde(default)]
    pub setup_time_ms: Option<f64>,
    #[serde(default)]
    pub rounds: Vec<RoundEntry>,
}

/// One benchmark execution outcome
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub prover: ProverDescriptor,
    pub success: bool,
    /// Always `Some` for successful records; `None` for failures
    pub results: Option<RunResults>,
}

/// Loose first pass: `results` of failed runs may be incomplete and must not abort ingestion
#[derive(Deserialize)]
struct WireRecord {
    prover: Value,
    /// Missing and `null` both mean the run failed
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    results: Option<Value>,
}

impl RawRecord {
    /// Parse one JSONL line
    pub fn from_json_line(line: &str) -> Result<Self, RecordError> {
        let wire: WireRecord = serde_json::from_str(line)?;
        let prover = ProverDescriptor::from_value(&wire.prover)?;
        let success = wire.success.unwrap_or(false);

        let results = if success {
            let payload = match wire.results {
                None | Some(Value::Null) => return Err(RecordError::MissingResults),
                Some(payload) => payload,
            };
            Some(serde_json::from_value(payload).map_err(RecordError::InvalidResults)?)
        } else {
            None
        };

        Ok(Self {
            prover,
            success,
            results,
        })
    }
}
