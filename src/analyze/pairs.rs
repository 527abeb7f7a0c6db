//! Pairwise aggregation: from per-line duplicate evidence to one canonical
//! record per unordered project pair.

use std::collections::HashMap;

use serde::Serialize;

use super::lines::DuplicateLineIndex;
use crate::sonar::RefFile;

/// Evidence gathered while processing one side of a pair: `from`'s retained
/// duplicate lines that point at `to`, and the number of `to`'s files that
/// contributed at least one of them.
#[derive(Debug, Clone)]
pub struct DirectedEvidence {
    pub from: String,
    pub to: String,
    pub num_lines: u64,
    pub spread: u64,
}

/// Canonical evidence for an unordered project pair, names sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairEvidence {
    pub project1: String,
    pub project2: String,
    pub num_lines: u64,
    pub spread: u64,
}

/// Count retained duplicate lines per referenced project for one component.
/// References to files of the component's own project are not copying
/// evidence and are skipped, as are references the table cannot resolve.
pub fn tally_component(
    index: &DuplicateLineIndex,
    files: &HashMap<String, RefFile>,
    own_project: &str,
) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();

    for refs in index.values() {
        for dup_ref in refs {
            let Some(file) = files.get(dup_ref) else {
                continue;
            };
            if file.project == own_project {
                continue;
            }
            *counts.entry(file.project.clone()).or_insert(0) += 1;
        }
    }

    counts
}

/// Running tallies for one project across its components.
#[derive(Debug, Default)]
pub struct ProjectStats {
    num_lines: HashMap<String, u64>,
    spread: HashMap<String, u64>,
}

impl ProjectStats {
    /// Fold in one component's per-project line counts. Spread increments
    /// once per component per referenced project, regardless of how many
    /// lines the component contributed.
    pub fn add_component(&mut self, counts: &HashMap<String, u64>) {
        for (project, lines) in counts {
            *self.num_lines.entry(project.clone()).or_insert(0) += lines;
            *self.spread.entry(project.clone()).or_insert(0) += 1;
        }
    }

    /// Emit directed records for every referenced project whose spread
    /// exceeds `minimum_spread`. A negative cutoff disables the filter.
    pub fn into_records(self, project: &str, minimum_spread: i64) -> Vec<DirectedEvidence> {
        self.num_lines
            .into_iter()
            .filter_map(|(other, num_lines)| {
                let spread = self.spread.get(&other).copied().unwrap_or(0);
                if (spread as i64) > minimum_spread {
                    Some(DirectedEvidence {
                        from: project.to_string(),
                        to: other,
                        num_lines,
                        spread,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Max-merge reducer over directed evidence.
///
/// A pair can be observed twice, once from each side; the canonical record
/// keeps the larger `num_lines` and the larger `spread` (both observations
/// are lower bounds on copying breadth). Counts are never summed across
/// directions, which would double-count the same duplicated region. The
/// reduction is commutative and associative, so worker results may arrive in
/// any order.
pub fn merge_evidence(records: Vec<DirectedEvidence>) -> Vec<PairEvidence> {
    let mut table: HashMap<(String, String), (u64, u64)> = HashMap::new();

    for record in records {
        let key = if record.from <= record.to {
            (record.from, record.to)
        } else {
            (record.to, record.from)
        };
        let entry = table.entry(key).or_insert((0, 0));
        entry.0 = entry.0.max(record.num_lines);
        entry.1 = entry.1.max(record.spread);
    }

    table
        .into_iter()
        .map(|((project1, project2), (num_lines, spread))| PairEvidence {
            project1,
            project2,
            num_lines,
            spread,
        })
        .collect()
}

#[cfg(test)]
#[path = "pairs_test.rs"]
mod tests;
