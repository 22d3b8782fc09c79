//! Human-readable analysis report

use crate::config::AnalysisConfig;
use crate::significance::SignificanceResult;
use crate::stats::StatSummary;
use crate::view::{AnalysisReport, ProverSummary};

const RULE_WIDTH: usize = 80;

/// Milliseconds as `1.23s` from one second up, `456ms` below
pub fn format_time(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else {
        format!("{:.0}ms", ms)
    }
}

/// `mean [lower, upper]`, in seconds or whole milliseconds
pub fn format_ci(summary: &StatSummary, in_seconds: bool) -> String {
    if in_seconds {
        format!(
            "{:.2}s [{:.2}, {:.2}]",
            summary.mean / 1000.0,
            summary.ci_lower / 1000.0,
            summary.ci_upper / 1000.0
        )
    } else {
        format!(
            "{:.0}ms [{:.0}, {:.0}]",
            summary.mean, summary.ci_lower, summary.ci_upper
        )
    }
}

fn format_t_statistic(t: f64) -> String {
    if t == f64::MAX {
        "inf".to_string()
    } else if t == -f64::MAX {
        "-inf".to_string()
    } else {
        format!("{:.3}", t)
    }
}

fn ci_label(config: &AnalysisConfig) -> String {
    format!("{:.0}% CI:", config.confidence_level * 100.0)
}

/// Render the full text report
pub fn render_report(report: &AnalysisReport, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str("BENCHMARK ANALYSIS REPORT\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    for (key, prover) in &report.provers {
        render_prover(&mut out, key, prover, config);
    }

    if !report.significance_tests.is_empty() {
        out.push_str(&format!("\n\n{}\n", "=".repeat(RULE_WIDTH)));
        out.push_str("STATISTICAL SIGNIFICANCE TESTS (Welch's t-test)\n");
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');

        for test in &report.significance_tests {
            render_test(&mut out, test);
        }
    }

    out.push('\n');
    out
}

fn render_prover(out: &mut String, key: &str, prover: &ProverSummary, config: &AnalysisConfig) {
    out.push_str(&format!("\n{}\n", "─".repeat(RULE_WIDTH)));
    out.push_str(&format!("PROVER: {}\n", key));
    out.push_str(&"─".repeat(RULE_WIDTH));
    out.push('\n');

    out.push_str(&format!(
        "\nRuns: {} successful / {} total ({:.1}% success)\n",
        prover.success_count,
        prover.total_runs(),
        prover.success_rate()
    ));

    if !prover.has_successes() {
        out.push_str("  No successful runs to analyze.\n");
        return;
    }

    let label = ci_label(config);
    let total = &prover.total_duration;

    out.push_str("\n📊 TOTAL DURATION\n");
    out.push_str(&format!(
        "  Mean:     {} ± {} (std)\n",
        format_time(total.mean),
        format_time(total.std)
    ));
    out.push_str(&format!("  {:<10}{}\n", label, format_ci(total, true)));
    out.push_str(&format!(
        "  Range:    [{}, {}]\n",
        format_time(total.min),
        format_time(total.max)
    ));
    out.push_str(&format!("  CV:       {:.1}%\n", total.cv));

    if let Some(setup) = &prover.setup_time {
        out.push_str("\n⏱️  SETUP TIME\n");
        out.push_str(&format!(
            "  Mean:     {} ± {} (std)\n",
            format_time(setup.mean),
            format_time(setup.std)
        ));
        out.push_str(&format!("  {:<10}{}\n", label, format_ci(setup, true)));
        out.push_str(&format!("  CV:       {:.1}%\n", setup.cv));
    }

    if let Some(avg_round) = &prover.avg_round_duration {
        out.push_str("\n🔄 AVERAGE ROUND DURATION (across all rounds)\n");
        out.push_str(&format!(
            "  Mean:     {} ± {} (std)\n",
            format_time(avg_round.mean),
            format_time(avg_round.std)
        ));
        out.push_str(&format!("  {:<10}{}\n", label, format_ci(avg_round, false)));
        out.push_str(&format!("  N:        {} round observations\n", avg_round.n));
    }

    if !prover.per_round.is_empty() {
        out.push_str("\n📈 PER-ROUND BREAKDOWN\n");
        for (round, summary) in &prover.per_round {
            let d = &summary.duration;
            out.push_str(&format!(
                "  Round {}: {} ± {} (n={}, CV={:.1}%)\n",
                round,
                format_time(d.mean),
                format_time(d.std),
                d.n,
                d.cv
            ));
        }
    }

    out.push_str("\n📏 SAMPLE ADEQUACY\n");
    if total.adequate_sample {
        out.push_str("  ✅ Sample size appears adequate for scientific reporting\n");
        out.push_str(&format!(
            "     (n={}, CV={:.1}%, CI width={:.1}% of mean)\n",
            total.n, total.cv, total.ci_width_pct
        ));
    } else {
        out.push_str("  ⚠️  Consider more runs for reliable statistics\n");
        out.push_str(&format!(
            "     Reasons: {}\n",
            total.inadequacy_reasons(config).join(", ")
        ));
        if let Some(n) = total.recommended_sample_size(config) {
            out.push_str(&format!(
                "     Estimated n for {}% CI width: ~{}\n",
                config.target_ci_width_pct, n
            ));
        }
    }
}

fn render_test(out: &mut String, test: &SignificanceResult) {
    out.push_str(&format!("\n{}:\n", test.comparison));
    out.push_str(&format!(
        "  t-statistic: {}\n",
        format_t_statistic(test.t_statistic)
    ));

    let marker = if test.significant_001 {
        " ***"
    } else if test.significant_005 {
        " **"
    } else {
        ""
    };
    out.push_str(&format!("  p-value:     {:.4}{}\n", test.p_value, marker));
    out.push_str(&format!(
        "  Cohen's d:   {:.3} ({})\n",
        test.cohens_d,
        test.effect_size()
    ));

    if test.significant_005 {
        out.push_str("  → Difference is statistically significant (p < 0.05)\n");
    } else {
        out.push_str("  → No statistically significant difference detected\n");
    }
}
