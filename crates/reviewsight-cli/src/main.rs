//! ReviewSight: theme extraction and insight synthesis for bank app reviews.

use std::path::{Path, PathBuf};

use anyhow::Context;
use reviewsight_core::{data_dir_from_env, DataPaths, PipelineConfig};
use reviewsight_ingest::{load_records, preprocess};
use reviewsight_runtime::Orchestrator;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

fn print_usage() {
    println!("ReviewSight: theme extraction and insight synthesis for app reviews");
    println!();
    println!("Usage: reviewsight <command>");
    println!();
    println!("Commands:");
    println!("  analyze <input> [output-dir]   Preprocess, extract themes, write insights");
    println!("  preprocess <input> [output]    Clean records and report data quality");
    println!("  help                           Show this help message");
    println!();
    println!("Input files are .csv or .json. Output defaults to $REVIEWSIGHT_DATA_DIR");
    println!("(default ./data): processed/ for records, reports/ for insights.");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "analyze" => {
            let Some(input) = args.get(2) else {
                eprintln!("Usage: reviewsight analyze <input> [output-dir]");
                std::process::exit(1);
            };
            let out_dir = match args.get(3) {
                Some(dir) => PathBuf::from(dir),
                None => DataPaths::new(data_dir_from_env())?.reports,
            };
            analyze(Path::new(input), &out_dir)
        }
        "preprocess" => {
            let Some(input) = args.get(2) else {
                eprintln!("Usage: reviewsight preprocess <input> [output]");
                std::process::exit(1);
            };
            let output = match args.get(3) {
                Some(path) => PathBuf::from(path),
                None => DataPaths::new(data_dir_from_env())?
                    .processed
                    .join("reviews_processed.csv"),
            };
            run_preprocess(Path::new(input), &output)
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}. Use 'reviewsight help' for usage.", other);
            std::process::exit(1);
        }
    }
}

fn run_preprocess(input: &Path, output: &Path) -> anyhow::Result<()> {
    let records = load_records(input)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;
    let outcome = preprocess(records);
    output::write_preprocessed(output, &outcome.reviews)?;
    output::print_quality(&outcome.report);
    println!("Saved to {}", output.display());
    Ok(())
}

fn analyze(input: &Path, out_dir: &Path) -> anyhow::Result<()> {
    let config = PipelineConfig::from_env();
    info!("Pipeline config: {:?}", config);

    let records = load_records(input)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;
    let outcome = preprocess(records);
    if outcome.reviews.is_empty() {
        anyhow::bail!("No valid reviews in {}", input.display());
    }

    let orchestrator = Orchestrator::new(config);
    let report = orchestrator.analyze(outcome.reviews);
    let files = output::write_analysis(out_dir, &report)?;

    output::print_quality(&outcome.report);
    println!();
    output::print_summary(&report, &files);
    Ok(())
}
