//! CLI argument parsing for prover-benchstats

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report (default)
    Report,
    /// CSV rows for plotting
    Csv,
    /// JSON document for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "prover-benchstats")]
#[command(version)]
#[command(
    about = "Statistical analysis of prover benchmark results (JSONL)",
    long_about = None
)]
pub struct Cli {
    /// Benchmark files or glob patterns (e.g. "results/*.jsonl")
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "report")]
    pub format: OutputFormat,

    /// Write CSV or JSON output to a file instead of stdout (not valid with the report format)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Analysis settings (TOML)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Confidence level for intervals, overrides the config file (e.g. 0.99)
    #[arg(long = "confidence", value_name = "LEVEL")]
    pub confidence: Option<f64>,

    /// Skip malformed lines instead of aborting
    #[arg(long = "skip-malformed")]
    pub skip_malformed: bool,

    /// Verbose diagnostic logging on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_files() {
        let cli = Cli::parse_from(["prover-benchstats", "a.jsonl", "results/*.jsonl"]);
        assert_eq!(cli.files, vec!["a.jsonl", "results/*.jsonl"]);
        assert_eq!(cli.format, OutputFormat::Report);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_requires_files() {
        assert!(Cli::try_parse_from(["prover-benchstats"]).is_err());
    }

    #[test]
    fn test_cli_format_csv() {
        let cli = Cli::parse_from(["prover-benchstats", "--format", "csv", "a.jsonl"]);
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    #[test]
    fn test_cli_format_short_json() {
        let cli = Cli::parse_from(["prover-benchstats", "-f", "json", "a.jsonl"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["prover-benchstats", "-f", "html", "a.jsonl"]).is_err());
    }

    #[test]
    fn test_cli_output_path() {
        let cli = Cli::parse_from(["prover-benchstats", "-o", "out.csv", "-f", "csv", "a.jsonl"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_cli_confidence_override() {
        let cli = Cli::parse_from(["prover-benchstats", "--confidence", "0.99", "a.jsonl"]);
        assert_eq!(cli.confidence, Some(0.99));
    }

    #[test]
    fn test_cli_flags_default_false() {
        let cli = Cli::parse_from(["prover-benchstats", "a.jsonl"]);
        assert!(!cli.skip_malformed);
        assert!(!cli.debug);
        assert!(cli.config.is_none());
        assert!(cli.confidence.is_none());
    }

    #[test]
    fn test_cli_skip_malformed_and_debug() {
        let cli = Cli::parse_from(["prover-benchstats", "--skip-malformed", "--debug", "a.jsonl"]);
        assert!(cli.skip_malformed);
        assert!(cli.debug);
    }
}
