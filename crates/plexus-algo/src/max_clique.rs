// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Maximum clique (backtracking) and maximal-clique enumeration
//! (Bron-Kerbosch, basic variant).
//!
//! Cliques are enumerated by depth-first extension over an adjacency
//! matrix: the current clique is only ever extended with a vertex greater
//! than its last member, so each vertex set is visited exactly once.
//! Self-loops are ignored.

use crate::Algorithm;
use fxhash::FxHashSet;
use plexus_common::graph::Graph;

pub struct MaximumClique;

#[derive(Debug, Clone, Default)]
pub struct MaxCliqueConfig {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliqueOutcome {
    pub size: usize,
    pub vertices: Vec<usize>,
}

impl Algorithm for MaximumClique {
    type Config = MaxCliqueConfig;
    type Output = CliqueOutcome;

    fn name() -> &'static str {
        "max_clique"
    }

    fn run(graph: &Graph, _config: Self::Config) -> Self::Output {
        let n = graph.vertex_count();
        if n == 1 {
            return CliqueOutcome {
                size: 1,
                vertices: vec![0],
            };
        }

        let adj = adjacency_matrix(graph);
        let mut best = Vec::new();
        let mut current = Vec::with_capacity(n);

        for start in 0..n {
            current.push(start);
            extend_clique(&adj, n, start + 1, &mut current, &mut best);
            current.pop();
        }

        CliqueOutcome {
            size: best.len(),
            vertices: best,
        }
    }
}

fn extend_clique(
    adj: &[Vec<bool>],
    n: usize,
    start: usize,
    current: &mut Vec<usize>,
    best: &mut Vec<usize>,
) {
    if current.len() > best.len() {
        best.clear();
        best.extend_from_slice(current);
    }

    for v in start..n {
        if current.iter().all(|&u| adj[v][u]) {
            current.push(v);
            extend_clique(adj, n, v + 1, current, best);
            current.pop();
        }
    }
}

/// Whether `vertices` are pairwise adjacent. Empty and singleton sets are
/// trivially cliques; out-of-range vertices disqualify the set.
pub fn is_clique(graph: &Graph, vertices: &[usize]) -> bool {
    let n = graph.vertex_count();
    if vertices.iter().any(|&v| v >= n) {
        return false;
    }
    if vertices.len() <= 1 {
        return true;
    }

    let adj = adjacency_matrix(graph);
    for (i, &u) in vertices.iter().enumerate() {
        for &v in &vertices[i + 1..] {
            if !adj[u][v] {
                return false;
            }
        }
    }
    true
}

/// All maximal cliques via basic Bron-Kerbosch (`R`, `P`, `X` sets, no
/// pivoting). Each clique is returned sorted; the list order follows the
/// recursion.
pub fn maximal_cliques(graph: &Graph) -> Vec<Vec<usize>> {
    let n = graph.vertex_count();
    let mut adj: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); n];
    for u in 0..n {
        for e in graph.neighbors(u) {
            if e.to != u {
                adj[u].insert(e.to);
                adj[e.to].insert(u);
            }
        }
    }

    let mut cliques = Vec::new();
    let mut r = Vec::new();
    let p: FxHashSet<usize> = (0..n).collect();
    let x = FxHashSet::default();
    bron_kerbosch(&adj, &mut r, p, x, &mut cliques);
    cliques
}

fn bron_kerbosch(
    adj: &[FxHashSet<usize>],
    r: &mut Vec<usize>,
    mut p: FxHashSet<usize>,
    mut x: FxHashSet<usize>,
    cliques: &mut Vec<Vec<usize>>,
) {
    if p.is_empty() && x.is_empty() {
        let mut clique = r.clone();
        clique.sort_unstable();
        cliques.push(clique);
        return;
    }

    let candidates: Vec<usize> = p.iter().copied().collect();
    for v in candidates {
        r.push(v);
        let p_next = p.iter().filter(|&&u| adj[v].contains(&u)).copied().collect();
        let x_next = x.iter().filter(|&&u| adj[v].contains(&u)).copied().collect();
        bron_kerbosch(adj, r, p_next, x_next, cliques);
        r.pop();

        p.remove(&v);
        x.insert(v);
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::graph_from_edges;
    use plexus_common::graph::Graph;

    #[test]
    fn test_triangle_is_max_clique() {
        let g = graph_from_edges(3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let outcome = MaximumClique::run(&g, MaxCliqueConfig::default());

        assert_eq!(outcome.size, 3);
        assert!(is_clique(&g, &outcome.vertices));
    }

    #[test]
    fn test_edge_in_sparse_graph() {
        let g = graph_from_edges(4, &[(0, 1, 5)]);
        let outcome = MaximumClique::run(&g, MaxCliqueConfig::default());

        assert_eq!(outcome.size, 2);
        assert_eq!(outcome.vertices, vec![0, 1]);
    }

    #[test]
    fn test_single_vertex_clique() {
        let g = Graph::new(1).unwrap();
        let outcome = MaximumClique::run(&g, MaxCliqueConfig::default());
        assert_eq!(outcome.size, 1);
        assert_eq!(outcome.vertices, vec![0]);
    }

    #[test]
    fn test_edgeless_graph_yields_singleton() {
        let g = Graph::new(4).unwrap();
        let outcome = MaximumClique::run(&g, MaxCliqueConfig::default());
        // Every vertex alone is a clique of size 1.
        assert_eq!(outcome.size, 1);
    }

    #[test]
    fn test_k4_inside_larger_graph() {
        let mut g = Graph::new(6).unwrap();
        for u in 0..4 {
            for v in (u + 1)..4 {
                g.add_edge(u, v).unwrap();
            }
        }
        g.add_edge(3, 4).unwrap();
        g.add_edge(4, 5).unwrap();

        let outcome = MaximumClique::run(&g, MaxCliqueConfig::default());
        assert_eq!(outcome.size, 4);
        assert_eq!(outcome.vertices, vec![0, 1, 2, 3]);
        assert!(is_clique(&g, &outcome.vertices));
    }

    #[test]
    fn test_is_clique_rejects_non_adjacent_pair() {
        let g = graph_from_edges(3, &[(0, 1, 1), (1, 2, 1)]);
        assert!(is_clique(&g, &[0, 1]));
        assert!(!is_clique(&g, &[0, 2]));
        assert!(!is_clique(&g, &[0, 9]));
        assert!(is_clique(&g, &[]));
        assert!(is_clique(&g, &[2]));
    }

    #[test]
    fn test_maximal_cliques_of_joined_triangles() {
        // Two triangles sharing vertex 2.
        let g = graph_from_edges(
            5,
            &[
                (0, 1, 1),
                (1, 2, 1),
                (2, 0, 1),
                (2, 3, 1),
                (3, 4, 1),
                (4, 2, 1),
            ],
        );
        let mut cliques = maximal_cliques(&g);
        cliques.sort();

        assert_eq!(cliques, vec![vec![0, 1, 2], vec![2, 3, 4]]);
    }

    #[test]
    fn test_maximal_cliques_include_isolated_vertices() {
        let g = graph_from_edges(3, &[(0, 1, 1)]);
        let mut cliques = maximal_cliques(&g);
        cliques.sort();

        assert_eq!(cliques, vec![vec![0, 1], vec![2]]);
    }
}
