//! Match report: resolve every line, then group inputs sharing a key.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use super::input::input_lines;
use super::{BatchSummary, TARGET_BATCH};
use crate::clustering::{build_clusters, write_report, Cluster, MatchRecord};
use crate::service::KeyResolver;

/// Clusters found for a batch together with the processing counts
#[derive(Debug)]
pub struct MatchReport {
    pub clusters: Vec<Cluster>,
    pub summary: BatchSummary,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Resolves every input line and keeps the ones that came back with a key.
///
/// Failed lookups and empty keys are logged and left out, so the returned
/// records are ready for clustering.
pub async fn collect_records<R, K>(
    reader: R,
    resolver: &K,
) -> Result<(Vec<MatchRecord>, BatchSummary)>
where
    R: BufRead,
    K: KeyResolver,
{
    let mut records = Vec::new();
    let mut summary = BatchSummary::default();

    for line in input_lines(reader) {
        let line = line.context("Failed to read input file")?;
        summary.lines_read += 1;

        match resolver.resolve(&line.value).await {
            Ok(response) if response.key.is_empty() => {
                summary.empty_keys += 1;
                debug!(
                    target: TARGET_BATCH,
                    "No similarity key for line {} ({:?}), skipping", line.line_number, line.value
                );
            }
            Ok(response) => {
                summary.resolved += 1;
                records.push(MatchRecord::new(line.value, response.key));
            }
            Err(err) => {
                summary.failed += 1;
                warn!(
                    target: TARGET_BATCH,
                    "Lookup failed for line {} ({:?}): {}", line.line_number, line.value, err
                );
            }
        }
    }

    info!(
        target: TARGET_BATCH,
        "Resolved {} of {} input values ({} failed, {} without a key)",
        summary.resolved,
        summary.lines_read,
        summary.failed,
        summary.empty_keys
    );

    Ok((records, summary))
}

/// Builds the match report for an input list.
pub async fn build_match_report<R, K>(reader: R, resolver: &K) -> Result<MatchReport>
where
    R: BufRead,
    K: KeyResolver,
{
    let (records, summary) = collect_records(reader, resolver).await?;
    let clusters = build_clusters(&records);
    info!(
        target: TARGET_BATCH,
        "Found {} clusters covering {} records",
        clusters.len(),
        crate::clustering::clustered_record_count(&clusters)
    );
    Ok(MatchReport { clusters, summary })
}

/// Builds the match report and writes it out. Nothing is written when no
/// clusters were found.
pub async fn generate_match_report<R, W, K>(
    reader: R,
    resolver: &K,
    writer: &mut W,
) -> Result<MatchReport>
where
    R: BufRead,
    W: Write,
    K: KeyResolver,
{
    let report = build_match_report(reader, resolver).await?;
    write_report(writer, &report.clusters).context("Failed to write match report")?;
    writer.flush().context("Failed to flush match report")?;
    Ok(report)
}
