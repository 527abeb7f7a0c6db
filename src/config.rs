//! Configuration for the analysis pipeline.
//!
//! Thresholds are an explicit value passed into the pipeline entry point,
//! never ambient constants, so tests can vary them freely. Values come from
//! an optional `dupcluster.toml` file and can be overridden per-flag on the
//! command line.

use std::error::Error;
use std::path::Path;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dupcluster.toml";

/// Default analysis server base URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:9000";

/// Tunable thresholds for the duplication aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Drop a duplicate line when it matches this many distinct files or
    /// more; such lines are almost always shared boilerplate, not copying.
    pub ignore_line_if_dups_more_than: usize,

    /// A pair is reported only when more than this many distinct files
    /// contributed evidence. `-1` disables the spread filter entirely.
    pub minimum_spread: i64,

    /// Projects whose total duplicated-line count does not exceed this are
    /// skipped before any per-file fetch.
    pub total_dup_lines_filter: u64,

    /// Pairs with `num_lines` at or below this cutoff are dropped.
    pub pair_min_num_lines: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ignore_line_if_dups_more_than: 3,
            minimum_spread: 2,
            total_dup_lines_filter: 50,
            pair_min_num_lines: 50,
        }
    }
}

impl AnalysisConfig {
    /// Apply command-line overrides on top of file/default values.
    pub fn with_overrides(
        mut self,
        ignore_line_if_dups_more_than: Option<usize>,
        minimum_spread: Option<i64>,
        total_dup_lines_filter: Option<u64>,
        pair_min_num_lines: Option<u64>,
    ) -> Self {
        if let Some(v) = ignore_line_if_dups_more_than {
            self.ignore_line_if_dups_more_than = v;
        }
        if let Some(v) = minimum_spread {
            self.minimum_spread = v;
        }
        if let Some(v) = total_dup_lines_filter {
            self.total_dup_lines_filter = v;
        }
        if let Some(v) = pair_min_num_lines {
            self.pair_min_num_lines = v;
        }
        self
    }
}

/// Analysis server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

/// Top-level `dupcluster.toml` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub server: ServerConfig,
    pub analysis: AnalysisConfig,
}

/// Load configuration from `path`, or from `dupcluster.toml` when no path is
/// given. An explicit path must exist; an absent default file yields the
/// built-in defaults.
pub fn load(path: Option<&Path>) -> Result<ConfigFile, Box<dyn Error>> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (Path::new(DEFAULT_CONFIG_FILE).to_path_buf(), false),
    };

    if !path.exists() {
        if explicit {
            return Err(format!("config file not found: {}", path.display()).into());
        }
        return Ok(ConfigFile::default());
    }

    let text = std::fs::read_to_string(&path)
        .map_err(|e| format!("cannot read config file {}: {e}", path.display()))?;
    let config: ConfigFile = toml::from_str(&text)
        .map_err(|e| format!("invalid config file {}: {e}", path.display()))?;
    Ok(config)
}
