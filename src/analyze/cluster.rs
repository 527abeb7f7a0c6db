//! Connected-component extraction over the pair graph.
//!
//! A minimal union-find is all the clustering needs: nodes are the projects
//! appearing in surviving pairs, edges the pairs themselves, and a cluster is
//! one component — a cohort of transitively linked submissions. Edge weights
//! play no role in connectivity.

use std::collections::BTreeMap;

/// Disjoint-set forest with path halving and union by size.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}

/// Partition the projects named by `edges` into connected components.
///
/// Deterministic for a given edge set regardless of edge order: members are
/// sorted within each cluster and clusters are sorted by their first member.
/// A project with no edge never appears.
pub fn connected_components<'a>(
    edges: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<Vec<String>> {
    let edges: Vec<(&str, &str)> = edges.into_iter().collect();

    // Stable node numbering via a sorted name → index map
    let mut ids: BTreeMap<&str, usize> = BTreeMap::new();
    for (a, b) in &edges {
        let next = ids.len();
        ids.entry(*a).or_insert(next);
        let next = ids.len();
        ids.entry(*b).or_insert(next);
    }

    let mut uf = UnionFind::new(ids.len());
    for (a, b) in &edges {
        uf.union(ids[a], ids[b]);
    }

    let mut components: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (name, id) in &ids {
        components
            .entry(uf.find(*id))
            .or_default()
            .push(name.to_string());
    }

    let mut clusters: Vec<Vec<String>> = components.into_values().collect();
    for cluster in &mut clusters {
        cluster.sort_unstable();
    }
    clusters.sort();
    clusters
}

#[cfg(test)]
#[path = "cluster_test.rs"]
mod tests;
