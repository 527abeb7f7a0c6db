use super::*;

#[test]
fn measures_response_with_value() {
    let response: MeasuresResponse = serde_json::from_str(
        r#"{
            "component": {
                "key": "alice",
                "measures": [
                    {"metric": "duplicated_lines", "value": "613"}
                ]
            }
        }"#,
    )
    .unwrap();
    assert_eq!(duplicated_lines_measure(&response), 613);
}

#[test]
fn measures_response_missing_measure_reads_as_zero() {
    let response: MeasuresResponse = serde_json::from_str(
        r#"{"component": {"key": "alice", "measures": []}}"#,
    )
    .unwrap();
    assert_eq!(duplicated_lines_measure(&response), 0);
}

#[test]
fn measures_response_missing_component_reads_as_zero() {
    let response: MeasuresResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(duplicated_lines_measure(&response), 0);
}

#[test]
fn measures_response_malformed_value_reads_as_zero() {
    let response: MeasuresResponse = serde_json::from_str(
        r#"{"component": {"measures": [{"metric": "duplicated_lines", "value": "n/a"}]}}"#,
    )
    .unwrap();
    assert_eq!(duplicated_lines_measure(&response), 0);
}

#[test]
fn measures_response_ignores_other_metrics() {
    let response: MeasuresResponse = serde_json::from_str(
        r#"{"component": {"measures": [
            {"metric": "ncloc", "value": "9999"},
            {"metric": "duplicated_lines", "value": "42"}
        ]}}"#,
    )
    .unwrap();
    assert_eq!(duplicated_lines_measure(&response), 42);
}

#[test]
fn components_response_parses_keys() {
    let response: ComponentsResponse = serde_json::from_str(
        r#"{
            "paging": {"pageIndex": 1, "pageSize": 500, "total": 2},
            "components": [
                {"key": "alice:src/Main.java", "qualifier": "FIL"},
                {"key": "alice:src/Util.java", "qualifier": "FIL"}
            ]
        }"#,
    )
    .unwrap();
    let keys: Vec<String> = response.components.into_iter().map(|c| c.key).collect();
    assert_eq!(keys, vec!["alice:src/Main.java", "alice:src/Util.java"]);
}

#[test]
fn duplications_response_parses_blocks_and_files() {
    let dups: ComponentDuplications = serde_json::from_str(
        r#"{
            "duplications": [
                {"blocks": [
                    {"from": 94, "size": 101, "_ref": "1"},
                    {"from": 83, "size": 101, "_ref": "2"}
                ]}
            ],
            "files": {
                "1": {"key": "alice:src/Main.java", "name": "Main.java", "project": "alice"},
                "2": {"key": "bob:src/Main.java", "name": "Main.java", "project": "bob"}
            }
        }"#,
    )
    .unwrap();

    assert_eq!(dups.duplications.len(), 1);
    let blocks = &dups.duplications[0].blocks;
    assert_eq!(blocks[0].dup_ref, SELF_REF);
    assert_eq!(blocks[0].from, 94);
    assert_eq!(blocks[0].size, 101);
    assert_eq!(dups.files["2"].project, "bob");
    assert_eq!(dups.files["2"].key, "bob:src/Main.java");
}

#[test]
fn duplications_response_tolerates_empty_body() {
    let dups: ComponentDuplications = serde_json::from_str("{}").unwrap();
    assert!(dups.duplications.is_empty());
    assert!(dups.files.is_empty());
}
