// Shared helpers for integration tests: JSONL fixture construction

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const DIRECT: &str = r#"{"Direct":{}}"#;
pub const PROXY_TEE: &str = r#"{"Proxy":{"proxy":{"host":"tee-proxy.example.com"}}}"#;
pub const PROXY_PLAIN: &str = r#"{"Proxy":{"proxy":{"host":"plain.example.com"}}}"#;
pub const TLS_BANDWIDTH: &str = r#"{"TlsSingleShot":{"notary":{"domain":"notary.example.com","network_optimization":"Bandwidth"}}}"#;

/// Successful run with the given total duration and optional setup time
pub fn success(prover: &str, total_ms: f64, setup_ms: Option<f64>) -> String {
    let setup = setup_ms
        .map(|s| format!(r#","setup_time_ms":{}"#, s))
        .unwrap_or_default();
    format!(
        r#"{{"prover":{},"success":true,"results":{{"total_duration_ms":{}{},"rounds":[]}}}}"#,
        prover, total_ms, setup
    )
}

/// Successful run with per-round durations (request/response bytes fixed)
pub fn success_with_rounds(prover: &str, total_ms: f64, rounds: &[f64]) -> String {
    let rounds: Vec<String> = rounds
        .iter()
        .enumerate()
        .map(|(i, d)| {
            format!(
                r#"{{"round":{},"duration_ms":{},"request_bytes":512,"response_bytes":2048}}"#,
                i + 1,
                d
            )
        })
        .collect();
    format!(
        r#"{{"prover":{},"success":true,"timestamp":"2024-05-01T12:00:00Z","results":{{"total_duration_ms":{},"rounds":[{}]}}}}"#,
        prover,
        total_ms,
        rounds.join(",")
    )
}

pub fn failure(prover: &str) -> String {
    format!(r#"{{"prover":{},"success":false,"error":"timeout"}}"#, prover)
}

/// Write lines as a JSONL file inside `dir`
pub fn write_jsonl(dir: &TempDir, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.path().join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

/// Five stable Direct runs plus five stable, much slower TLS runs
pub fn two_group_lines() -> Vec<String> {
    let mut lines = Vec::new();
    for t in [100.0, 102.0, 98.0, 101.0, 99.0] {
        lines.push(success_with_rounds(DIRECT, t, &[40.0, 50.0]));
    }
    for t in [1000.0, 1020.0, 980.0, 1010.0, 990.0] {
        lines.push(success_with_rounds(TLS_BANDWIDTH, t, &[400.0, 500.0]));
    }
    lines
}
