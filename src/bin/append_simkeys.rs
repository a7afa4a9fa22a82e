//! # Append Simkeys
//!
//! Writes a two-column CSV file pairing every input line with the key the
//! matching service returns for it. With `-e org-standard` the second column
//! holds the standardized organization name instead.
//!
//! ## Usage
//!
//! ```
//! cargo run --bin append_simkeys -- --input companies.txt --output output.csv
//! cargo run --bin append_simkeys -- -e org-standard -i orgs.txt -o standardized.csv
//! ```

use anyhow::{bail, Result};
use clap::Parser;
use simkey::batch::{append_simkeys, create_output, open_input};
use simkey::cli::{InputArgs, ServiceArgs};
use simkey::{logging, MatchingService};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Write each input value with its similarity key to CSV")]
struct Args {
    #[command(flatten)]
    service: ServiceArgs,

    #[command(flatten)]
    input: InputArgs,

    /// Output CSV file (defaults to $SIMKEY_OUTPUT or output.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let args = Args::parse();
    let config = args
        .service
        .into_config()?
        .with_input(args.input.input)
        .with_output(args.output);

    if config.endpoint.key_field().is_none() {
        bail!(
            "Endpoint '{}' does not return a key column to append",
            config.endpoint
        );
    }

    let service = MatchingService::new(&config)?;
    info!(
        "Appending {} keys for {} to {}",
        config.endpoint,
        config.input_path.display(),
        config.output_path.display()
    );

    let reader = open_input(&config.input_path)?;
    let mut writer = create_output(&config.output_path)?;
    let summary = append_simkeys(reader, &service, &mut writer).await?;

    if summary.unresolved() > 0 {
        info!(
            "{} of {} rows have an empty key column",
            summary.unresolved(),
            summary.lines_read
        );
    }

    println!("Done. Results written to {}", config.output_path.display());
    Ok(())
}
