//! CSV export of the pair table for the presentation layer.

use std::error::Error;
use std::path::Path;

use super::pairs::PairEvidence;

const HEADER: &str = "project1,project2,num_lines,spread";

/// Render the pair table as CSV, rows sorted by `(project1, project2)` so
/// re-running with the same data reproduces the file byte for byte.
pub fn render_csv(pairs: &[PairEvidence]) -> String {
    let mut rows: Vec<&PairEvidence> = pairs.iter().collect();
    rows.sort_by(|a, b| (&a.project1, &a.project2).cmp(&(&b.project1, &b.project2)));

    let mut out = String::from(HEADER);
    out.push('\n');
    for p in rows {
        out.push_str(&format!(
            "{},{},{},{}\n",
            p.project1, p.project2, p.num_lines, p.spread
        ));
    }
    out
}

/// Write the pair table to `path`, overwriting any previous export. An empty
/// table writes the header line only.
pub fn write_csv(path: &Path, pairs: &[PairEvidence]) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, render_csv(pairs))
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
