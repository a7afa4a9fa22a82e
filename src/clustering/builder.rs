//! Groups match records that share a similarity key.
//!
//! Records are sorted by key first and then scanned once, so that equal keys
//! sit next to each other. The sort is stable: records with the same key keep
//! the order in which they arrived from the input file.

use tracing::debug;

use super::types::{Cluster, MatchRecord};
use super::TARGET_CLUSTER;

/// Builds the clusters for a whole batch of records.
///
/// # Arguments
/// * `records` - Records in arrival order. Callers must have dropped records
///   with an empty key already.
///
/// # Returns
/// Every group of two or more records with an identical key, ordered by key
/// ascending.
pub fn build_clusters(records: &[MatchRecord]) -> Vec<Cluster> {
    let mut sorted = records.to_vec();
    // `sort_by` is stable, which keeps same-key records in input order
    sorted.sort_by(|a, b| a.key.cmp(&b.key));

    let mut clusters = Vec::new();
    let mut current: Vec<MatchRecord> = Vec::new();

    for record in sorted {
        let key_changed = current
            .last()
            .map_or(false, |last| last.key != record.key);

        if key_changed {
            flush_run(&mut current, &mut clusters);
        }
        current.push(record);
    }

    // Flush the final run after the scan
    flush_run(&mut current, &mut clusters);

    debug!(
        target: TARGET_CLUSTER,
        "Built {} clusters from {} records",
        clusters.len(),
        records.len()
    );

    clusters
}

fn flush_run(current: &mut Vec<MatchRecord>, clusters: &mut Vec<Cluster>) {
    if current.is_empty() {
        return;
    }
    if let Some(cluster) = Cluster::from_run(std::mem::take(current)) {
        clusters.push(cluster);
    }
}

/// Total number of records that ended up in a cluster
pub fn clustered_record_count(clusters: &[Cluster]) -> usize {
    clusters.iter().map(Cluster::len).sum()
}
