// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Clique counting by exhaustive enumeration.
//!
//! Counts every non-empty clique (not only maximal ones) using the same
//! depth-first extension as the maximum-clique search, bucketed by size:
//! each vertex is a 1-clique, each edge a 2-clique, each triangle a
//! 3-clique, and so on. A dedicated triangle fast path enumerates ordered
//! triples directly.

use crate::Algorithm;
use plexus_common::graph::Graph;

pub struct CliqueCount;

#[derive(Debug, Clone, Default)]
pub struct CliqueCountConfig {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOutcome {
    pub total: u64,
    /// `by_size[k]` is the number of k-cliques; index 0 is unused.
    pub by_size: Vec<u64>,
    /// Largest clique size observed, 0 when the count is empty.
    pub max_size: usize,
}

impl Algorithm for CliqueCount {
    type Config = CliqueCountConfig;
    type Output = CountOutcome;

    fn name() -> &'static str {
        "clique_count"
    }

    fn run(graph: &Graph, _config: Self::Config) -> Self::Output {
        let n = graph.vertex_count();
        let adj = adjacency_matrix(graph);

        let mut by_size = vec![0u64; n + 1];
        let mut current = Vec::with_capacity(n);
        count_cliques(&adj, n, 0, &mut current, &mut by_size);

        let total = by_size.iter().sum();
        let max_size = by_size
            .iter()
            .rposition(|&count| count > 0)
            .unwrap_or(0);

        CountOutcome {
            total,
            by_size,
            max_size,
        }
    }
}

fn count_cliques(
    adj: &[Vec<bool>],
    n: usize,
    start: usize,
    current: &mut Vec<usize>,
    by_size: &mut [u64],
) {
    if !current.is_empty() {
        by_size[current.len()] += 1;
    }

    for v in start..n {
        if current.iter().all(|&u| adj[v][u]) {
            current.push(v);
            count_cliques(adj, n, v + 1, current, by_size);
            current.pop();
        }
    }
}

/// Number of cliques of exactly `k` vertices, with prefix pruning.
pub fn count_of_size(graph: &Graph, k: usize) -> u64 {
    let n = graph.vertex_count();
    if k == 0 || k > n {
        return 0;
    }

    let adj = adjacency_matrix(graph);
    let mut count = 0u64;
    let mut current = Vec::with_capacity(k);
    count_exact(&adj, n, 0, k, &mut current, &mut count);
    count
}

fn count_exact(
    adj: &[Vec<bool>],
    n: usize,
    start: usize,
    target: usize,
    current: &mut Vec<usize>,
    count: &mut u64,
) {
    if current.len() == target {
        *count += 1;
        return;
    }
    // Not enough vertices left to reach the target size.
    if current.len() + (n - start) < target {
        return;
    }

    for v in start..n {
        if current.iter().all(|&u| adj[v][u]) {
            current.push(v);
            count_exact(adj, n, v + 1, target, current, count);
            current.pop();
        }
    }
}

/// Triangle (3-clique) count over ordered triples `i < j < k`.
pub fn count_triangles(graph: &Graph) -> u64 {
    let n = graph.vertex_count();
    if n < 3 {
        return 0;
    }

    let adj = adjacency_matrix(graph);
    let mut count = 0u64;
    for i in 0..n {
        for j in (i + 1)..n {
            if adj[i][j] {
                for k in (j + 1)..n {
                    if adj[i][k] && adj[j][k] {
                        count += 1;
                    }
                }
            }
        }
    }
    count
}

fn adjacency_matrix(graph: &Graph) -> Vec<Vec<bool>> {
    let n = graph.vertex_count();
    let mut adj = vec![vec![false; n]; n];
    for u in 0..n {
        for e in graph.neighbors(u) {
            if e.to != u {
                adj[u][e.to] = true;
            }
        }
    }
    adj
}
