//! gazette - integrate per-document extractions into one knowledge graph.
//!
//! Reads enhanced per-document JSON files, merges them into a deduplicated
//! global graph, and writes the graph JSON plus Neo4j bulk-import CSVs.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use gazette_core::IntegratorConfig;
use gazette_integrator::{integrate_directory, Integrator};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(author, version, about = "Cross-document entity and relation integration", long_about = None)]
struct Cli {
    /// Directory of enhanced per-document JSON files
    #[arg(short, long, default_value = "enhanced_results")]
    input: PathBuf,

    /// Output path for the integrated knowledge graph JSON
    #[arg(short, long, default_value = "integrated_results/integrated_knowledge_graph.json")]
    output: PathBuf,

    /// Output directory for the Neo4j import CSV files
    #[arg(long, default_value = "neo4j_import")]
    csv_dir: PathBuf,

    /// Text similarity threshold for entity matching (0.0 - 1.0)
    #[arg(long, default_value = "0.8")]
    threshold: f64,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = IntegratorConfig::with_threshold(cli.threshold);
    let mut integrator = Integrator::new(config);

    let summary = integrate_directory(&mut integrator, &cli.input)?;

    integrator.write_json(&cli.output)?;
    integrator.write_neo4j_csv(&cli.csv_dir)?;

    let report = integrator.validate();
    println!("{}", report);

    println!("Integration complete!");
    println!(
        "Processed {} files ({} skipped) with {} total documents",
        summary.files_processed, summary.files_skipped, summary.documents
    );
    println!(
        "Integrated {} unique entities and {} unique relations",
        report.total_entities, report.total_relations
    );

    if summary.files_skipped > 0 {
        warn!(
            "{} input files could not be parsed and were skipped",
            summary.files_skipped
        );
    }
    if report.locations_without_coords > 0 {
        warn!(
            "{} location entities are missing coordinate information",
            report.locations_without_coords
        );
    }
    if report.times_without_dates > 0 {
        warn!(
            "{} time entities are missing date information",
            report.times_without_dates
        );
    }

    Ok(())
}
