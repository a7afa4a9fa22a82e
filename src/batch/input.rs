//! Reading the input list.

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter;
use std::path::Path;
use tracing::warn;

use super::TARGET_BATCH;

/// One value from the input file with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub line_number: usize,
    pub value: String,
}

/// Opens the input list for reading
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Iterates the non-empty lines of a reader.
///
/// Blank lines are skipped but still counted, so line numbers match the
/// file. Bytes that are not valid UTF-8 are replaced with U+FFFD and the
/// line is still yielded. Values are otherwise kept exactly as written.
pub fn input_lines<R: BufRead>(
    mut reader: R,
) -> impl Iterator<Item = io::Result<InputLine>> {
    let mut line_number = 0;
    let mut buf = Vec::new();

    iter::from_fn(move || loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return None,
            Ok(_) => {
                line_number += 1;
                if buf.ends_with(b"\n") {
                    buf.pop();
                    if buf.ends_with(b"\r") {
                        buf.pop();
                    }
                }
                if buf.is_empty() {
                    continue;
                }
                let value = match String::from_utf8_lossy(&buf) {
                    Cow::Borrowed(text) => text.to_string(),
                    Cow::Owned(text) => {
                        warn!(
                            target: TARGET_BATCH,
                            "Line {} is not valid UTF-8, invalid bytes replaced", line_number
                        );
                        text
                    }
                };
                return Some(Ok(InputLine { line_number, value }));
            }
            Err(err) => return Some(Err(err)),
        }
    })
}
