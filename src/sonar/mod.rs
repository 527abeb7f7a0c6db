//! Client for the SonarQube web API, the external duplication engine.
//!
//! The pipeline consumes the engine through the `DuplicationSource` trait so
//! tests can substitute an in-memory fake. The engine computes duplicate
//! blocks; this crate only aggregates them, so the wire types below mirror
//! the API shape directly.

use std::collections::HashMap;
use std::error::Error;
use std::time::Duration;

use serde::Deserialize;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Component tree page size; coursework projects fit in one page.
const COMPONENTS_PAGE_SIZE: u32 = 500;

/// Reference id the engine assigns to the component under query. The first
/// block of every duplication group carries it.
pub const SELF_REF: &str = "1";

/// One occurrence of a duplicated region: a line range in the file denoted
/// by `dup_ref` (an id resolved through the reference table).
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub from: usize,
    pub size: usize,
    #[serde(rename = "_ref")]
    pub dup_ref: String,
}

/// A duplication group: the first block is the queried component's own
/// region, the rest are the matching occurrences elsewhere.
#[derive(Debug, Clone, Deserialize)]
pub struct Duplication {
    pub blocks: Vec<Block>,
}

/// Resolution of a reference id to the file (and owning project) it denotes.
#[derive(Debug, Clone, Deserialize)]
pub struct RefFile {
    #[allow(dead_code)]
    pub key: String,
    pub project: String,
}

/// Raw duplication report for one component: the duplication groups plus the
/// reference table for every file they mention.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentDuplications {
    #[serde(default)]
    pub duplications: Vec<Duplication>,
    #[serde(default)]
    pub files: HashMap<String, RefFile>,
}

/// Abstraction over the duplication engine consumed by the pipeline.
///
/// `Sync` because fetches for different projects and components run
/// concurrently on a worker pool.
pub trait DuplicationSource: Sync {
    /// Total duplicated lines for a project; absent data reads as 0.
    fn duplicated_line_count(&self, project: &str) -> Result<u64, Box<dyn Error>>;

    /// Keys of a project's analyzable files.
    fn components(&self, project: &str) -> Result<Vec<String>, Box<dyn Error>>;

    /// Raw duplication report for one component.
    fn duplications(&self, component: &str) -> Result<ComponentDuplications, Box<dyn Error>>;
}

// Wire types for /api/measures/component.

#[derive(Debug, Deserialize)]
pub(crate) struct MeasuresResponse {
    #[serde(default)]
    component: Option<MeasuredComponent>,
}

#[derive(Debug, Deserialize)]
struct MeasuredComponent {
    #[serde(default)]
    measures: Vec<Measure>,
}

#[derive(Debug, Deserialize)]
struct Measure {
    metric: String,
    // the API reports measure values as strings
    #[serde(default)]
    value: Option<String>,
}

/// Extract the `duplicated_lines` measure, treating an absent or malformed
/// value as 0 so a single odd project never halts the run.
pub(crate) fn duplicated_lines_measure(response: &MeasuresResponse) -> u64 {
    response
        .component
        .iter()
        .flat_map(|c| c.measures.iter())
        .find(|m| m.metric == "duplicated_lines")
        .and_then(|m| m.value.as_deref())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

// Wire types for /api/components/tree.

#[derive(Debug, Deserialize)]
pub(crate) struct ComponentsResponse {
    #[serde(default)]
    pub(crate) components: Vec<ComponentEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComponentEntry {
    pub(crate) key: String,
}

/// Blocking HTTP client for a SonarQube server.
pub struct SonarClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl SonarClient {
    pub fn new(base_url: &str) -> Result<Self, Box<dyn Error>> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Box<dyn Error>> {
        let url = format!("{}{path}", self.base_url);
        let resp = self.http.get(&url).query(query).send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(format!("server error ({status}) on {path}: {body}").into());
        }

        Ok(resp.json()?)
    }
}

impl DuplicationSource for SonarClient {
    fn duplicated_line_count(&self, project: &str) -> Result<u64, Box<dyn Error>> {
        let response: MeasuresResponse = self.get_json(
            "/api/measures/component",
            &[("component", project), ("metricKeys", "duplicated_lines")],
        )?;
        Ok(duplicated_lines_measure(&response))
    }

    fn components(&self, project: &str) -> Result<Vec<String>, Box<dyn Error>> {
        let page_size = COMPONENTS_PAGE_SIZE.to_string();
        let response: ComponentsResponse = self.get_json(
            "/api/components/tree",
            &[
                ("component", project),
                ("ps", page_size.as_str()),
                ("qualifiers", "FIL"),
            ],
        )?;
        Ok(response.components.into_iter().map(|c| c.key).collect())
    }

    fn duplications(&self, component: &str) -> Result<ComponentDuplications, Box<dyn Error>> {
        self.get_json("/api/duplications/show", &[("key", component)])
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
