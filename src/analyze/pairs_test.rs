use super::*;
use std::collections::{BTreeMap, HashSet};

fn ref_table(entries: &[(&str, &str)]) -> HashMap<String, RefFile> {
    entries
        .iter()
        .map(|(dup_ref, project)| {
            (
                dup_ref.to_string(),
                RefFile {
                    key: format!("{project}:src/file_{dup_ref}.java"),
                    project: project.to_string(),
                },
            )
        })
        .collect()
}

fn index_of(lines: &[(usize, &[&str])]) -> DuplicateLineIndex {
    lines
        .iter()
        .map(|(line, refs)| {
            let set: HashSet<String> = refs.iter().map(|r| r.to_string()).collect();
            (*line, set)
        })
        .collect::<BTreeMap<_, _>>()
}

fn directed(from: &str, to: &str, num_lines: u64, spread: u64) -> DirectedEvidence {
    DirectedEvidence {
        from: from.to_string(),
        to: to.to_string(),
        num_lines,
        spread,
    }
}

#[test]
fn tally_counts_lines_per_referenced_project() {
    let files = ref_table(&[("2", "bob"), ("3", "bob"), ("4", "carol")]);
    let index = index_of(&[(1, &["2"]), (2, &["2", "4"]), (3, &["3"])]);

    let counts = tally_component(&index, &files, "alice");
    assert_eq!(counts["bob"], 3);
    assert_eq!(counts["carol"], 1);
}

#[test]
fn tally_skips_own_project_references() {
    let files = ref_table(&[("2", "alice"), ("3", "bob")]);
    let index = index_of(&[(1, &["2", "3"])]);

    let counts = tally_component(&index, &files, "alice");
    assert_eq!(counts.len(), 1);
    assert_eq!(counts["bob"], 1);
}

#[test]
fn tally_skips_unresolvable_references() {
    let files = ref_table(&[("2", "bob")]);
    let index = index_of(&[(1, &["2", "99"])]);

    let counts = tally_component(&index, &files, "alice");
    assert_eq!(counts.len(), 1);
}

#[test]
fn spread_increments_once_per_component() {
    let mut stats = ProjectStats::default();
    let mut first = HashMap::new();
    first.insert("bob".to_string(), 10u64);
    let mut second = HashMap::new();
    second.insert("bob".to_string(), 30u64);

    stats.add_component(&first);
    stats.add_component(&second);
    stats.add_component(&HashMap::new()); // component with no evidence

    let records = stats.into_records("alice", -1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].num_lines, 40);
    assert_eq!(records[0].spread, 2);
}

#[test]
fn records_filtered_by_minimum_spread() {
    let mut stats = ProjectStats::default();
    let mut counts = HashMap::new();
    counts.insert("bob".to_string(), 10u64);
    stats.add_component(&counts);
    stats.add_component(&counts);

    // spread is 2; the filter is strictly-greater
    let mut same = ProjectStats::default();
    same.add_component(&counts);
    same.add_component(&counts);
    assert!(same.into_records("alice", 2).is_empty());

    let records = stats.into_records("alice", 1);
    assert_eq!(records.len(), 1);
}

#[test]
fn negative_minimum_spread_disables_the_filter() {
    let mut stats = ProjectStats::default();
    let mut counts = HashMap::new();
    counts.insert("bob".to_string(), 5u64);
    stats.add_component(&counts);

    let records = stats.into_records("alice", -1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].spread, 1);
}

#[test]
fn merge_keeps_the_larger_observation() {
    let merged = merge_evidence(vec![
        directed("alice", "bob", 120, 5),
        directed("bob", "alice", 90, 7),
    ]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].project1, "alice");
    assert_eq!(merged[0].project2, "bob");
    assert_eq!(merged[0].num_lines, 120);
    assert_eq!(merged[0].spread, 7);
}

#[test]
fn merge_is_order_independent() {
    let forward = merge_evidence(vec![
        directed("alice", "bob", 120, 5),
        directed("bob", "alice", 90, 3),
    ]);
    let backward = merge_evidence(vec![
        directed("bob", "alice", 90, 3),
        directed("alice", "bob", 120, 5),
    ]);
    assert_eq!(forward, backward);
}

#[test]
fn merge_never_sums_directions() {
    let merged = merge_evidence(vec![
        directed("alice", "bob", 100, 4),
        directed("bob", "alice", 100, 4),
    ]);
    assert_eq!(merged[0].num_lines, 100, "max-merge, never a naive sum");
}

#[test]
fn merge_keeps_distinct_pairs_apart() {
    let mut merged = merge_evidence(vec![
        directed("alice", "bob", 120, 5),
        directed("carol", "bob", 80, 3),
    ]);
    merged.sort_by(|a, b| (&a.project1, &a.project2).cmp(&(&b.project1, &b.project2)));
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].project1, "alice");
    assert_eq!(merged[1].project1, "bob");
    assert_eq!(merged[1].project2, "carol");
}

#[test]
fn merge_empty_input() {
    assert!(merge_evidence(Vec::new()).is_empty());
}
