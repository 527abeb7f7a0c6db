//! Pair threshold and min–max weight normalization.

use super::pairs::PairEvidence;

/// A surviving pair with its normalized graph edge weight in [0, 1]. The raw
/// counts are kept for the exported table.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPair {
    pub evidence: PairEvidence,
    pub weight: f64,
}

/// Drop pairs whose line count does not exceed `min_num_lines`, separating
/// incidental overlap from substantial copying.
pub fn apply_threshold(pairs: Vec<PairEvidence>, min_num_lines: u64) -> Vec<PairEvidence> {
    pairs
        .into_iter()
        .filter(|p| p.num_lines > min_num_lines)
        .collect()
}

/// Min–max normalize `num_lines` across the whole surviving set. When all
/// values are equal (including a single pair) every weight is 1.0, so the
/// degenerate case never divides by zero.
pub fn normalize_weights(pairs: Vec<PairEvidence>) -> Vec<WeightedPair> {
    let Some(min) = pairs.iter().map(|p| p.num_lines).min() else {
        return Vec::new();
    };
    let max = pairs.iter().map(|p| p.num_lines).max().unwrap_or(min);
    let range = max - min;

    pairs
        .into_iter()
        .map(|evidence| {
            let weight = if range == 0 {
                1.0
            } else {
                (evidence.num_lines - min) as f64 / range as f64
            };
            WeightedPair { evidence, weight }
        })
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
