//! Per-component duplicate line index and the boilerplate noise filter.

use std::collections::{BTreeMap, HashSet};

use crate::sonar::{Duplication, SELF_REF};

/// Line number → reference ids whose files duplicate that line.
pub type DuplicateLineIndex = BTreeMap<usize, HashSet<String>>;

/// Build the line index for one component by unioning reference sets over
/// every line each duplication group covers. Every covered line appears as a
/// key, even with a single matching reference.
///
/// Groups whose first block does not carry the self reference are malformed
/// engine output and are skipped.
pub fn build_line_index(duplications: &[Duplication]) -> DuplicateLineIndex {
    let mut index = DuplicateLineIndex::new();

    for duplication in duplications {
        let Some(origin) = duplication.blocks.first() else {
            continue;
        };
        if origin.dup_ref != SELF_REF {
            continue;
        }

        let refs: Vec<&str> = duplication.blocks[1..]
            .iter()
            .map(|b| b.dup_ref.as_str())
            .collect();

        for line in origin.from..origin.from + origin.size {
            index
                .entry(line)
                .or_default()
                .extend(refs.iter().map(|r| r.to_string()));
        }
    }

    index
}

/// Drop lines matched by `max_refs` or more distinct files. A line shared
/// that widely is common scaffolding, not pairwise copying, and would flood
/// the signal with false positives. Pure and idempotent.
pub fn filter_noise(index: DuplicateLineIndex, max_refs: usize) -> DuplicateLineIndex {
    index
        .into_iter()
        .filter(|(_, refs)| refs.len() < max_refs)
        .collect()
}

#[cfg(test)]
#[path = "lines_test.rs"]
mod tests;
