//! Run configuration shared by the command-line tools.

use std::path::PathBuf;
use thiserror::Error;
use tokio::time::Duration;
use url::Url;

use crate::environment::{get_env_var, get_env_var_parsed};
use crate::service::{Endpoint, DEFAULT_BASE_URL, REQUEST_TIMEOUT};

pub const ENV_API_KEY: &str = "INTERZOID_API_KEY";
pub const ENV_BASE_URL: &str = "SIMKEY_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "SIMKEY_TIMEOUT_SECS";
pub const ENV_INPUT: &str = "SIMKEY_INPUT";
pub const ENV_OUTPUT: &str = "SIMKEY_OUTPUT";
pub const ENV_ALGORITHM: &str = "SIMKEY_ALGORITHM";
pub const ENV_CUSTOM_OUTPUT: &str = "SIMKEY_CUSTOM_OUTPUT";

pub const DEFAULT_INPUT_FILE: &str = "sample-input-file.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no API key configured; set INTERZOID_API_KEY or pass --api-key")]
    MissingApiKey,
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("{0}")]
    InvalidValue(String),
}

/// Settings for a run against the matching service.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// License key sent with every request
    pub api_key: String,
    pub endpoint: Endpoint,
    /// Algorithm override; the endpoint default applies when `None`
    pub algorithm: Option<String>,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: Endpoint::CompanyMatch,
            algorithm: None,
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with whatever the environment provides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = get_env_var(ENV_API_KEY) {
            config.api_key = key;
        }
        if let Some(url) = get_env_var(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(path) = get_env_var(ENV_INPUT) {
            config.input_path = PathBuf::from(path);
        }
        if let Some(path) = get_env_var(ENV_OUTPUT) {
            config.output_path = PathBuf::from(path);
        }
        config.algorithm = get_env_var(ENV_ALGORITHM);

        let secs = get_env_var_parsed(ENV_TIMEOUT_SECS, REQUEST_TIMEOUT.as_secs())
            .map_err(ConfigError::InvalidValue)?;
        config.timeout = Duration::from_secs(secs);

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Option<String>) -> Self {
        if algorithm.is_some() {
            self.algorithm = algorithm;
        }
        self
    }

    pub fn with_input(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.input_path = path;
        }
        self
    }

    pub fn with_output(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.output_path = path;
        }
        self
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    pub fn with_timeout_secs(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }

    /// Checks the settings needed before any request is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        match Url::parse(&self.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                return Err(ConfigError::InvalidBaseUrl {
                    url: self.base_url.clone(),
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                })
            }
            Err(err) => {
                return Err(ConfigError::InvalidBaseUrl {
                    url: self.base_url.clone(),
                    reason: err.to_string(),
                })
            }
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
