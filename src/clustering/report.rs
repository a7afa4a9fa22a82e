//! Text rendering of a match report.

use std::io::{self, Write};

use super::types::Cluster;

/// Writes clusters as two-column lines, `input,key`, with one blank line
/// after every cluster. Nothing at all is written for an empty slice.
pub fn write_report<W: Write>(writer: &mut W, clusters: &[Cluster]) -> io::Result<()> {
    for cluster in clusters {
        for record in cluster {
            writeln!(writer, "{}", record)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Renders the report into a string
pub fn render_report(clusters: &[Cluster]) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_report(&mut buffer, clusters);
    String::from_utf8_lossy(&buffer).into_owned()
}
