//! Append simkeys: one CSV row per input line with the key next to it.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use super::input::input_lines;
use super::{BatchSummary, TARGET_BATCH};
use crate::service::KeyResolver;

/// Creates the output file, truncating any previous content
pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Two-column CSV writer for the key file. Fields are quoted only when they
/// hold a comma, a quote, or a line break, and rows end with `\n`.
pub fn key_file_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// Writes `original,key` for every non-empty input line.
///
/// A row is written whatever the lookup outcome, with an empty key cell on
/// failure, so the output lines up with the input.
pub async fn append_simkeys<R, W, K>(
    reader: R,
    resolver: &K,
    writer: &mut W,
) -> Result<BatchSummary>
where
    R: BufRead,
    W: Write,
    K: KeyResolver,
{
    let mut summary = BatchSummary::default();
    let mut rows = key_file_writer(writer);

    for line in input_lines(reader) {
        let line = line.context("Failed to read input file")?;
        summary.lines_read += 1;

        let key = match resolver.resolve(&line.value).await {
            Ok(response) => {
                if response.key.is_empty() {
                    summary.empty_keys += 1;
                    warn!(
                        target: TARGET_BATCH,
                        "Empty key for line {} ({:?})", line.line_number, line.value
                    );
                } else {
                    summary.resolved += 1;
                }
                response.key
            }
            Err(err) => {
                summary.failed += 1;
                warn!(
                    target: TARGET_BATCH,
                    "Lookup failed for line {} ({:?}): {}", line.line_number, line.value, err
                );
                String::new()
            }
        };

        if let Err(err) = rows.write_record([line.value.as_str(), key.as_str()]) {
            warn!(
                target: TARGET_BATCH,
                "Error writing CSV row for line {} ({:?}): {}", line.line_number, line.value, err
            );
        }
    }

    rows.flush().context("Failed to flush output file")?;

    info!(
        target: TARGET_BATCH,
        "Wrote {} rows ({} with keys, {} failed, {} empty)",
        summary.lines_read,
        summary.resolved,
        summary.failed,
        summary.empty_keys
    );

    Ok(summary)
}
