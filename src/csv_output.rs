//! CSV export of analysis results
//!
//! One row per (group, metric). Metrics: `total_duration_ms`,
//! `setup_time_ms`, `avg_round_duration_ms`, `round_<k>_duration_ms`.

use crate::stats::StatSummary;
use crate::view::AnalysisReport;

const HEADER: &str = "prover_type,metric,n,mean,std,ci_lower,ci_upper,min,max,cv,adequate";

/// One CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct CsvSummaryRow {
    pub prover_type: String,
    pub metric: String,
    pub summary: StatSummary,
}

/// CSV statistics output formatter
#[derive(Debug, Default)]
pub struct CsvSummaryOutput {
    rows: Vec<CsvSummaryRow>,
}

impl CsvSummaryOutput {
    /// Create an empty CSV formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect rows for every group with at least one successful run
    pub fn from_report(report: &AnalysisReport) -> Self {
        let mut output = Self::new();

        for (key, prover) in report.successful_provers() {
            output.add_row(key, "total_duration_ms", prover.total_duration);

            if let Some(setup) = prover.setup_time {
                output.add_row(key, "setup_time_ms", setup);
            }

            if let Some(avg_round) = prover.avg_round_duration {
                output.add_row(key, "avg_round_duration_ms", avg_round);
            }

            for (round, summary) in &prover.per_round {
                output.add_row(key, &format!("round_{}_duration_ms", round), summary.duration);
            }
        }

        output
    }

    /// Add a row
    pub fn add_row(&mut self, prover_type: &str, metric: &str, summary: StatSummary) {
        self.rows.push(CsvSummaryRow {
            prover_type: prover_type.to_string(),
            metric: metric.to_string(),
            summary,
        });
    }

    pub fn rows(&self) -> &[CsvSummaryRow] {
        &self.rows
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format a row; `adequate` keeps the True/False spelling of earlier exports
    fn format_row(row: &CsvSummaryRow) -> String {
        let s = &row.summary;
        let fields = [
            Self::escape_field(&row.prover_type),
            Self::escape_field(&row.metric),
            s.n.to_string(),
            format!("{:.2}", s.mean),
            format!("{:.2}", s.std),
            format!("{:.2}", s.ci_lower),
            format!("{:.2}", s.ci_upper),
            format!("{:.2}", s.min),
            format!("{:.2}", s.max),
            format!("{:.2}", s.cv),
            if s.adequate_sample { "True" } else { "False" }.to_string(),
        ];
        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(HEADER);
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}
