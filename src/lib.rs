pub mod batch;
pub mod cli;
pub mod clustering;
pub mod config;
pub mod environment;
pub mod logging;
pub mod service;

pub const TARGET_WEB_REQUEST: &str = "web_request";

pub use config::MatchConfig;
pub use service::{Endpoint, KeyResolver, MatchingService};
