use anyhow::{Context, Result};
use clap::Parser;
use prover_benchstats::{
    aggregate::Aggregator,
    cli::{Cli, OutputFormat},
    config::AnalysisConfig,
    csv_output::CsvSummaryOutput,
    input::expand_inputs,
    json_output::JsonOutput,
    report_output::render_report,
    view::analyze,
};
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber on stderr
///
/// `--debug` forces TRACE; otherwise RUST_LOG applies, defaulting to warnings.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(confidence) = args.confidence {
        config.confidence_level = confidence;
    }
    if args.skip_malformed {
        config.skip_malformed = true;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    if args.format == OutputFormat::Report && args.output.is_some() {
        anyhow::bail!("--output requires --format csv or --format json");
    }

    let config = load_config(&args)?;

    let files = expand_inputs(&args.files)?;
    if files.is_empty() {
        anyhow::bail!("No benchmark files found.");
    }

    eprintln!("Analyzing {} file(s)...", files.len());

    let mut aggregator = Aggregator::with_config(&config);
    for file in &files {
        aggregator.ingest_file(file)?;
    }

    if aggregator.is_empty() {
        anyhow::bail!("No benchmark data found in files.");
    }
    if aggregator.skipped_lines() > 0 {
        eprintln!("Skipped {} malformed line(s)", aggregator.skipped_lines());
    }

    let report = analyze(aggregator.groups(), &config);
    info!(
        groups = report.provers.len(),
        tests = report.significance_tests.len(),
        "analysis complete"
    );

    let (rendered, label) = match args.format {
        OutputFormat::Report => {
            print!("{}", render_report(&report, &config));
            return Ok(());
        }
        OutputFormat::Csv => (CsvSummaryOutput::from_report(&report).to_csv(), "CSV"),
        OutputFormat::Json => {
            let mut json = JsonOutput::from_report(&report).to_json()?;
            json.push('\n');
            (json, "JSON")
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} exported to: {}", label, path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
