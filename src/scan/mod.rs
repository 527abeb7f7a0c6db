//! Thin orchestration around the external `sonar-scanner` binary: submit
//! every project directory to the analysis server, cross-project duplicate
//! detection enabled. No analysis logic lives here.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::util;

/// Exclusion globs passed to every scan; build output and vendored
/// dependencies would otherwise dominate the duplicate counts.
const GLOBAL_EXCLUSIONS: &str =
    "**/node_modules/**,**/venv/**,**/out/**,**/target/**,**/build/**,**/*.xml,**/htmlcov/**,**/*.html";

/// Token window the engine uses for cross-project duplicate detection.
const MINIMUM_TOKENS: u32 = 74;

/// How a project directory is submitted to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    /// Plain `sonar-scanner` over the source tree.
    Generic,
    /// `mvn sonar:sonar` from the directory of the shallowest `pom.xml`.
    Maven,
}

impl ProjectType {
    pub fn parse(s: &str) -> Result<Self, Box<dyn Error>> {
        match s {
            "generic" => Ok(Self::Generic),
            "maven" => Ok(Self::Maven),
            other => Err(format!("unknown project type: {other}").into()),
        }
    }
}

/// Scanner `-D` properties shared by both project types.
fn scan_properties(
    project: &str,
    dir: &Path,
    server: &str,
    login: &str,
    password: &str,
) -> Vec<String> {
    vec![
        format!("-Dsonar.login={login}"),
        format!("-Dsonar.password={password}"),
        format!("-Dsonar.projectKey={project}"),
        format!("-Dsonar.sources={}", dir.display()),
        format!("-Dsonar.host.url={server}"),
        format!("-Dsonar.projectBaseDir={}", dir.display()),
        "-Dsonar.cpd.cross_project=true".to_string(),
        format!("-Dsonar.cpd.minimumTokens={MINIMUM_TOKENS}"),
        "-Dsonar.coverage.exclusions=*".to_string(),
        format!("-Dsonar.global.exclusions={GLOBAL_EXCLUSIONS}"),
        "-Dsonar.java.binaries=.".to_string(),
    ]
}

/// Find the shallowest `pom.xml` under `dir` (breadth-first), the module
/// root Maven should be invoked from.
fn find_pom(dir: &Path) -> Option<PathBuf> {
    let mut queue = vec![dir.to_path_buf()];
    while !queue.is_empty() {
        let mut next = Vec::new();
        for d in queue {
            let candidate = d.join("pom.xml");
            if candidate.is_file() {
                return Some(candidate);
            }
            let Ok(entries) = std::fs::read_dir(&d) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    next.push(path);
                }
            }
        }
        next.sort();
        queue = next;
    }
    None
}

fn scan_project(
    scanner: &str,
    project: &str,
    dir: &Path,
    server: &str,
    login: &str,
    password: &str,
    project_type: ProjectType,
) -> Result<(), Box<dyn Error>> {
    let (program, cwd, mut args) = match project_type {
        ProjectType::Generic => (scanner.to_string(), dir.to_path_buf(), Vec::new()),
        ProjectType::Maven => {
            let pom = find_pom(dir).ok_or("no pom.xml found")?;
            let pom_dir = pom.parent().unwrap_or(dir).to_path_buf();
            ("mvn".to_string(), pom_dir, vec!["sonar:sonar".to_string()])
        }
    };
    args.extend(scan_properties(project, dir, server, login, password));

    let status = Command::new(&program)
        .args(&args)
        .current_dir(&cwd)
        .status()
        .map_err(|e| format!("cannot run {program}: {e}"))?;
    if !status.success() {
        return Err(format!("{program} exited with {status}").into());
    }
    Ok(())
}

/// Entry point for the `scan` subcommand: submit every project directory
/// under `repos`, continuing past individual scan failures.
pub fn run(
    repos: &Path,
    scanner: &str,
    server: &str,
    login: &str,
    password: &str,
    project_type: ProjectType,
) -> Result<(), Box<dyn Error>> {
    let projects = util::list_project_dirs(repos)?;
    if projects.is_empty() {
        println!("No project directories found under {}.", repos.display());
        return Ok(());
    }

    let banner = "=".repeat(80);
    let mut failed = 0usize;
    for (i, project) in projects.iter().enumerate() {
        println!("{banner}");
        println!("{project} {}/{}", i + 1, projects.len());
        println!("{banner}");

        let dir = repos.join(project);
        if let Err(err) = scan_project(
            scanner,
            project,
            &dir,
            server,
            login,
            password,
            project_type,
        ) {
            eprintln!("warning: {project}: {err}");
            failed += 1;
        }
    }

    if failed > 0 {
        println!("{failed}/{} scans failed.", projects.len());
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
