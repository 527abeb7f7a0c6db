/// Report formatters for the duplication analysis.
///
/// Displays the surviving project pairs with their raw evidence and the
/// normalized edge weight, followed by the suspected copying cohorts.
use serde::Serialize;

use super::AnalysisOutcome;
use crate::report_helpers;

/// Print the pair table and cluster listing.
pub fn print_report(outcome: &AnalysisOutcome) {
    if outcome.pairs.is_empty() {
        println!("No project pairs above thresholds.");
        return;
    }

    let max_a = report_helpers::max_name_width(
        outcome.pairs.iter().map(|p| p.evidence.project1.as_str()),
        8,
    );
    let max_b = report_helpers::max_name_width(
        outcome.pairs.iter().map(|p| p.evidence.project2.as_str()),
        8,
    );
    let separator = report_helpers::separator((max_a + max_b + 28).max(60));

    println!("Duplicated Code — Suspected Copying Pairs");
    println!("{separator}");
    println!(
        " {:<aw$}  {:<bw$}  {:>6}  {:>6}  {:>6}",
        "Project",
        "Project",
        "Lines",
        "Spread",
        "Weight",
        aw = max_a,
        bw = max_b,
    );
    println!("{separator}");

    for p in &outcome.pairs {
        println!(
            " {:<aw$}  {:<bw$}  {:>6}  {:>6}  {:>6.2}",
            p.evidence.project1,
            p.evidence.project2,
            p.evidence.num_lines,
            p.evidence.spread,
            p.weight,
            aw = max_a,
            bw = max_b,
        );
    }

    println!("{separator}");
    println!();
    println!(
        "{} suspected cluster{}:",
        outcome.clusters.len(),
        if outcome.clusters.len() == 1 { "" } else { "s" }
    );
    for (i, cluster) in outcome.clusters.iter().enumerate() {
        println!("  {}. {}", i + 1, cluster.join(", "));
    }
}

/// JSON-serializable representation of one surviving pair.
#[derive(Serialize)]
struct JsonPair {
    project1: String,
    project2: String,
    num_lines: u64,
    spread: u64,
    weight: f64,
}

#[derive(Serialize)]
struct JsonOutcome {
    pairs: Vec<JsonPair>,
    clusters: Vec<Vec<String>>,
}

/// Serialize the pair table and clusters as pretty-printed JSON to stdout.
pub fn print_json(outcome: &AnalysisOutcome) -> Result<(), Box<dyn std::error::Error>> {
    let pairs: Vec<JsonPair> = outcome
        .pairs
        .iter()
        .map(|p| JsonPair {
            project1: p.evidence.project1.clone(),
            project2: p.evidence.project2.clone(),
            num_lines: p.evidence.num_lines,
            spread: p.evidence.spread,
            weight: (p.weight * 100.0).round() / 100.0,
        })
        .collect();

    report_helpers::print_json_stdout(&JsonOutcome {
        pairs,
        clusters: outcome.clusters.clone(),
    })
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
