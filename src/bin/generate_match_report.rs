//! # Match Report
//!
//! Looks up the similarity key of every line of an input file and prints the
//! groups of lines the matching service considers the same entity.
//!
//! ## Usage
//!
//! ```
//! cargo run --bin generate_match_report -- --input companies.txt
//! cargo run --bin generate_match_report -- -e address -i addresses.txt -o report.txt
//! ```
//!
//! Each cluster is printed as `input,key` lines followed by a blank line.

use anyhow::{bail, Result};
use clap::Parser;
use simkey::batch::{create_output, generate_match_report, open_input};
use simkey::cli::{InputArgs, ServiceArgs};
use simkey::{logging, MatchingService};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Group input values that share a similarity key")]
struct Args {
    #[command(flatten)]
    service: ServiceArgs,

    #[command(flatten)]
    input: InputArgs,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let args = Args::parse();
    let config = args.service.into_config()?.with_input(args.input.input);

    if config.endpoint.key_field().is_none() {
        bail!(
            "Endpoint '{}' does not return a similarity key and cannot be clustered",
            config.endpoint
        );
    }

    let service = MatchingService::new(&config)?;
    info!(
        "Generating match report for {} using endpoint {}",
        config.input_path.display(),
        config.endpoint
    );

    let reader = open_input(&config.input_path)?;
    let report = match args.output {
        Some(ref path) => {
            let mut writer = create_output(path)?;
            generate_match_report(reader, &service, &mut writer).await?
        }
        None => {
            let mut writer = io::stdout().lock();
            generate_match_report(reader, &service, &mut writer).await?
        }
    };

    if report.summary.resolved == 0 {
        eprintln!("No records with similarity keys found.");
        return Ok(());
    }

    if let Some(path) = args.output {
        println!(
            "Done. {} clusters written to {}",
            report.clusters.len(),
            path.display()
        );
    }

    Ok(())
}
