//! Similarity-key clustering for match reports.

// Module declarations
pub mod builder;
pub mod report;
#[cfg(test)]
mod tests;
pub mod types;

pub use types::*;

pub use builder::{build_clusters, clustered_record_count};
pub use report::{render_report, write_report};

pub const TARGET_CLUSTER: &str = "cluster";
