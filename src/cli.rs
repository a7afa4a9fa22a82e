//! Command-line arguments shared by the binaries.

use clap::Args;
use std::path::PathBuf;

use crate::config::{ConfigError, MatchConfig};
use crate::service::Endpoint;

/// Options selecting and reaching a matching-service endpoint
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// API license key (defaults to $INTERZOID_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Endpoint: company, individual, address, org-standard, business-info,
    /// parent-company, email-trust, custom
    #[arg(short, long, default_value = "company")]
    pub endpoint: Endpoint,

    /// Matching algorithm, e.g. model-v4-wide (match endpoints only)
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ServiceArgs {
    /// Environment settings overridden by whatever was given on the command line
    pub fn into_config(self) -> Result<MatchConfig, ConfigError> {
        let config = MatchConfig::from_env()?
            .with_api_key(self.api_key)
            .with_endpoint(self.endpoint)
            .with_algorithm(self.algorithm)
            .with_base_url(self.base_url)
            .with_timeout_secs(self.timeout);
        config.validate()?;
        Ok(config)
    }
}

/// Input file option
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file with one value per line (defaults to $SIMKEY_INPUT or sample-input-file.txt)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}
