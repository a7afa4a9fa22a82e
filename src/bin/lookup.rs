//! # Single Lookup
//!
//! Calls one matching-service endpoint for a single value and prints the
//! fields of the response.
//!
//! ## Usage
//!
//! ```
//! cargo run --bin lookup -- ibm
//! cargo run --bin lookup -- -e address "400 East Broadway St"
//! cargo run --bin lookup -- -e email-trust billsmith11@gmail.com
//! cargo run --bin lookup -- -e custom IBM --topic "detailed information about companies" \
//!     --fields "headquarters;ceo;website"
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use simkey::cli::ServiceArgs;
use simkey::config::ENV_CUSTOM_OUTPUT;
use simkey::environment::{get_env_var_as_vec, split_list};
use simkey::{logging, Endpoint, MatchingService};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(author, version, about = "Look up a single value against the matching service")]
struct Args {
    #[command(flatten)]
    service: ServiceArgs,

    /// Value to look up
    value: String,

    /// Topic of a custom enrichment request
    #[arg(long, default_value = "detailed information about companies")]
    topic: String,

    /// Model used by a custom enrichment request
    #[arg(long, default_value = "default")]
    model: String,

    /// Semicolon-separated fields a custom enrichment request should return
    /// (defaults to $SIMKEY_CUSTOM_OUTPUT)
    #[arg(long)]
    fields: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let args = Args::parse();
    let config = args.service.into_config()?;
    let mut service = MatchingService::new(&config)?;

    let requested = match args.fields {
        Some(ref fields) => split_list(fields, ';'),
        None => get_env_var_as_vec(ENV_CUSTOM_OUTPUT, ';'),
    };

    if config.endpoint == Endpoint::CustomEnrichment {
        let output = serde_json::to_string(&requested)
            .context("Failed to encode requested output fields")?;
        service = service
            .with_param("topic", args.topic.as_str())
            .with_param("model", args.model.as_str())
            .with_param("output", output);
    }

    let response = service
        .fetch(&args.value)
        .await
        .with_context(|| format!("Lookup of {:?} failed", args.value))?;

    if !response.is_success() {
        warn!("Service returned code '{}' for {:?}", response.code(), args.value);
    }

    println!("{}  {}", config.endpoint.to_string().bright_blue(), args.value.bright_yellow());
    println!("{}", "─".repeat(60).dimmed());
    for (label, value) in response.labelled_fields(config.endpoint, &requested) {
        let value = if label == "Result Code" && !response.is_success() {
            value.bright_red().to_string()
        } else {
            value
        };
        println!("{}: {}", label.bright_blue(), value);
    }

    Ok(())
}
