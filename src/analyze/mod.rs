//! The duplication-aggregation and clustering pipeline.
//!
//! Fetch → noise filter → pairwise aggregation → threshold/normalize →
//! cluster → report/export, recomputed from scratch on every invocation.
//! Fetches are the dominant cost and run on a worker pool; each worker
//! returns partial directed evidence and a single coordinator merge folds
//! them with the max-reducer, so completion order never matters.

mod cluster;
mod export;
mod lines;
mod normalize;
mod pairs;
mod report;

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use rayon::prelude::*;

use crate::config::AnalysisConfig;
use crate::sonar::{DuplicationSource, SonarClient};
use normalize::WeightedPair;
use pairs::DirectedEvidence;

/// Final result of one pipeline run: surviving weighted pairs sorted by
/// `(project1, project2)` and the cluster partition.
pub struct AnalysisOutcome {
    pub pairs: Vec<WeightedPair>,
    pub clusters: Vec<Vec<String>>,
}

/// Gather directed evidence for one project across all of its components.
///
/// Any fetch failure degrades to "no duplication data for that unit" with a
/// warning; a single unreachable component never halts the run.
fn gather_project<S: DuplicationSource>(
    source: &S,
    project: &str,
    cfg: &AnalysisConfig,
) -> Vec<DirectedEvidence> {
    let components = match source.components(project) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("warning: {project}: cannot list components: {err}");
            return Vec::new();
        }
    };

    let component_counts: Vec<_> = components
        .par_iter()
        .map(|component| match source.duplications(component) {
            Ok(dups) => {
                let index = lines::build_line_index(&dups.duplications);
                let index = lines::filter_noise(index, cfg.ignore_line_if_dups_more_than);
                pairs::tally_component(&index, &dups.files, project)
            }
            Err(err) => {
                eprintln!("warning: {component}: cannot fetch duplications: {err}");
                HashMap::new()
            }
        })
        .collect();

    let mut stats = pairs::ProjectStats::default();
    for counts in &component_counts {
        stats.add_component(counts);
    }

    stats.into_records(project, cfg.minimum_spread)
}

/// Run the full pipeline over `projects` against `source`.
///
/// Always terminates with a (possibly empty) pair table and partition; bad
/// projects are excluded, never fatal.
pub fn analyze<S: DuplicationSource>(
    source: &S,
    projects: &[String],
    cfg: &AnalysisConfig,
) -> AnalysisOutcome {
    // Cheap pre-check before any per-component fetch
    let relevant: Vec<&String> = projects
        .par_iter()
        .filter(|project| {
            match source.duplicated_line_count(project) {
                Ok(total) => total > cfg.total_dup_lines_filter,
                Err(err) => {
                    // unreachable project reads as zero evidence
                    eprintln!("warning: {project}: cannot fetch duplicated line count: {err}");
                    false
                }
            }
        })
        .collect();

    let directed: Vec<DirectedEvidence> = relevant
        .par_iter()
        .flat_map_iter(|project| gather_project(source, project, cfg))
        .collect();

    let merged = pairs::merge_evidence(directed);
    let surviving = normalize::apply_threshold(merged, cfg.pair_min_num_lines);
    let mut weighted = normalize::normalize_weights(surviving);
    weighted.sort_by(|a, b| {
        (&a.evidence.project1, &a.evidence.project2)
            .cmp(&(&b.evidence.project1, &b.evidence.project2))
    });

    let clusters = cluster::connected_components(
        weighted
            .iter()
            .map(|w| (w.evidence.project1.as_str(), w.evidence.project2.as_str())),
    );

    AnalysisOutcome {
        pairs: weighted,
        clusters,
    }
}

/// Entry point for the `analyze` subcommand.
pub fn run(
    server_url: &str,
    projects: &[String],
    cfg: &AnalysisConfig,
    jobs: Option<usize>,
    json: bool,
    csv: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let client = SonarClient::new(server_url)?;

    let outcome = match jobs {
        Some(n) => {
            if n == 0 {
                return Err("--jobs must be at least 1".into());
            }
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            pool.install(|| analyze(&client, projects, cfg))
        }
        None => analyze(&client, projects, cfg),
    };

    if let Some(path) = csv {
        let evidence: Vec<_> = outcome.pairs.iter().map(|w| w.evidence.clone()).collect();
        export::write_csv(path, &evidence)?;
    }

    if json {
        report::print_json(&outcome)?;
    } else {
        report::print_report(&outcome);
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
