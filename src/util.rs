use std::error::Error;
use std::path::Path;

/// Root-level directories that are never submission projects.
pub const EXCLUDE_DIRS: &[&str] = &["node_modules", "venv", "target", "out", "build"];

/// List submission project directories directly under `root`, sorted by name.
///
/// Hidden directories and common tooling directories (`node_modules`, `venv`,
/// build output) are skipped; the directory name doubles as the project key
/// used with the analysis server.
pub fn list_project_dirs(root: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let mut names: Vec<String> = Vec::new();

    for entry in std::fs::read_dir(root)
        .map_err(|e| format!("cannot read projects directory {}: {e}", root.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') || EXCLUDE_DIRS.contains(&name.as_str()) {
            continue;
        }
        names.push(name);
    }

    names.sort_unstable();
    Ok(names)
}
