use super::*;
use std::fs;

#[test]
fn project_type_parse() {
    assert_eq!(ProjectType::parse("generic").unwrap(), ProjectType::Generic);
    assert_eq!(ProjectType::parse("maven").unwrap(), ProjectType::Maven);
    assert!(ProjectType::parse("gradle").is_err());
}

#[test]
fn scan_properties_carry_the_project_key_and_server() {
    let props = scan_properties(
        "alice",
        Path::new("/work/repos/alice"),
        "http://localhost:9000",
        "admin",
        "admin",
    );
    assert!(props.contains(&"-Dsonar.projectKey=alice".to_string()));
    assert!(props.contains(&"-Dsonar.host.url=http://localhost:9000".to_string()));
    assert!(props.contains(&"-Dsonar.cpd.cross_project=true".to_string()));
    assert!(props.contains(&"-Dsonar.cpd.minimumTokens=74".to_string()));
    assert!(
        props
            .iter()
            .any(|p| p.starts_with("-Dsonar.global.exclusions=") && p.contains("node_modules"))
    );
}

#[test]
fn find_pom_picks_the_shallowest() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("module/submodule")).unwrap();
    fs::write(dir.path().join("module/submodule/pom.xml"), "<project/>").unwrap();
    fs::write(dir.path().join("module/pom.xml"), "<project/>").unwrap();

    let pom = find_pom(dir.path()).unwrap();
    assert_eq!(pom, dir.path().join("module/pom.xml"));
}

#[test]
fn find_pom_at_root_wins() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("module")).unwrap();
    fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();
    fs::write(dir.path().join("module/pom.xml"), "<project/>").unwrap();

    assert_eq!(find_pom(dir.path()).unwrap(), dir.path().join("pom.xml"));
}

#[test]
fn find_pom_none_without_pom() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    assert!(find_pom(dir.path()).is_none());
}

#[test]
fn run_on_empty_repos_dir() {
    let dir = tempfile::tempdir().unwrap();
    run(
        dir.path(),
        "sonar-scanner",
        "http://localhost:9000",
        "admin",
        "admin",
        ProjectType::Generic,
    )
    .unwrap();
}

#[test]
fn run_continues_past_a_missing_scanner_binary() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("alice")).unwrap();
    fs::create_dir(dir.path().join("bob")).unwrap();

    // scanner binary does not exist; both scans fail with a warning but the
    // run itself succeeds
    run(
        dir.path(),
        "/nonexistent/sonar-scanner",
        "http://localhost:9000",
        "admin",
        "admin",
        ProjectType::Generic,
    )
    .unwrap();
}

#[test]
fn maven_scan_without_pom_is_a_per_project_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("alice")).unwrap();
    run(
        dir.path(),
        "sonar-scanner",
        "http://localhost:9000",
        "admin",
        "admin",
        ProjectType::Maven,
    )
    .unwrap();
}
