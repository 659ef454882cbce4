// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Eulerian circuit (Hierholzer's algorithm).
//!
//! A circuit exists iff the graph has at least one edge, every degree is
//! even, and the subgraph on non-isolated vertices is connected. Extraction
//! walks unused edges with an explicit stack and a per-vertex cursor,
//! splicing sub-walks as they close.

use crate::Algorithm;
use plexus_common::graph::Graph;

pub struct EulerCircuit;

#[derive(Debug, Clone, Default)]
pub struct EulerConfig {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerOutcome {
    pub exists: bool,
    /// Closed walk of length `m + 1` when `exists`, empty otherwise.
    pub circuit: Vec<usize>,
}

impl Algorithm for EulerCircuit {
    type Config = EulerConfig;
    type Output = EulerOutcome;

    fn name() -> &'static str {
        "euler"
    }

    fn run(graph: &Graph, _config: Self::Config) -> Self::Output {
        if !has_circuit(graph) {
            return EulerOutcome {
                exists: false,
                circuit: Vec::new(),
            };
        }
        EulerOutcome {
            exists: true,
            circuit: find_circuit(graph),
        }
    }
}

/// Whether an Eulerian circuit exists.
pub fn has_circuit(graph: &Graph) -> bool {
    if graph.edge_count() == 0 {
        return false;
    }
    let n = graph.vertex_count();
    if (0..n).any(|v| graph.degree(v) % 2 != 0) {
        return false;
    }
    graph.is_connected_ignoring_isolated()
}

/// Deduplicated view of the undirected edges: each edge gets one id, and
/// each vertex lists the ids incident to it. A self-loop is one id that
/// appears twice in its vertex's list.
struct EdgeView {
    edges: Vec<(usize, usize)>,
    incidence: Vec<Vec<usize>>,
}

fn build_edge_view(graph: &Graph) -> EdgeView {
    let n = graph.vertex_count();
    let mut edges = Vec::with_capacity(graph.edge_count());
    let mut incidence = vec![Vec::new(); n];
    let mut loop_halves = vec![0usize; n];

    for u in 0..n {
        for e in graph.neighbors(u) {
            let v = e.to;
            if u == v {
                // Every second u->u incidence completes one self-loop.
                loop_halves[u] += 1;
                if loop_halves[u] % 2 == 0 {
                    let id = edges.len();
                    edges.push((u, u));
                    incidence[u].push(id);
                    incidence[u].push(id);
                }
            } else if u < v {
                let id = edges.len();
                edges.push((u, v));
                incidence[u].push(id);
                incidence[v].push(id);
            }
        }
    }

    EdgeView { edges, incidence }
}

fn find_circuit(graph: &Graph) -> Vec<usize> {
    let view = build_edge_view(graph);
    let n = graph.vertex_count();
    let Some(start) = (0..n).find(|&v| !view.incidence[v].is_empty()) else {
        return Vec::new();
    };

    let mut used = vec![false; view.edges.len()];
    let mut cursor = vec![0usize; n];
    let mut stack = vec![start];
    let mut path = Vec::with_capacity(view.edges.len() + 1);

    while let Some(&u) = stack.last() {
        while cursor[u] < view.incidence[u].len() && used[view.incidence[u][cursor[u]]] {
            cursor[u] += 1;
        }

        if cursor[u] == view.incidence[u].len() {
            path.push(u);
            stack.pop();
        } else {
            let id = view.incidence[u][cursor[u]];
            cursor[u] += 1;
            used[id] = true;
            let (a, b) = view.edges[id];
            stack.push(if u == a { b } else { a });
        }
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::graph_from_edges;

    fn assert_valid_circuit(graph: &Graph, circuit: &[usize]) {
        let m = graph.edge_count();
        assert_eq!(circuit.len(), m + 1);
        assert_eq!(circuit.first(), circuit.last());

        // Consecutive vertices must consume distinct edges covering all.
        let mut seen = std::collections::HashSet::new();
        for pair in circuit.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            assert!(graph.weight(u, v) > 0, "{u}--{v} is not an edge");
            let key = (u.min(v), u.max(v));
            assert!(seen.insert(key), "edge {key:?} traversed twice");
        }
        assert_eq!(seen.len(), m);
    }

    #[test]
    fn test_triangle_has_circuit() {
        let g = graph_from_edges(3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let outcome = EulerCircuit::run(&g, EulerConfig::default());
        assert!(outcome.exists);
        assert_valid_circuit(&g, &outcome.circuit);
    }

    #[test]
    fn test_odd_degree_has_no_circuit() {
        // A path 0-1-2 leaves vertices 0 and 2 with odd degree.
        let g = graph_from_edges(3, &[(0, 1, 1), (1, 2, 1)]);
        let outcome = EulerCircuit::run(&g, EulerConfig::default());
        assert!(!outcome.exists);
        assert!(outcome.circuit.is_empty());
    }

    #[test]
    fn test_edgeless_graph_has_no_circuit() {
        let g = Graph::new(3).unwrap();
        assert!(!has_circuit(&g));
    }

    #[test]
    fn test_disconnected_even_graph_has_no_circuit() {
        // Two disjoint triangles: all degrees even, not connected.
        let g = graph_from_edges(
            6,
            &[
                (0, 1, 1),
                (1, 2, 1),
                (2, 0, 1),
                (3, 4, 1),
                (4, 5, 1),
                (5, 3, 1),
            ],
        );
        assert!(!has_circuit(&g));
    }

    #[test]
    fn test_self_loop_is_traversed_once() {
        // Triangle plus a self-loop on vertex 1: degrees stay even.
        let g = graph_from_edges(3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1), (1, 1, 1)]);
        let outcome = EulerCircuit::run(&g, EulerConfig::default());
        assert!(outcome.exists);
        assert_eq!(outcome.circuit.len(), 5);
        assert_eq!(outcome.circuit.first(), outcome.circuit.last());
    }

    #[test]
    fn test_isolated_vertices_are_ignored() {
        let g = graph_from_edges(5, &[(1, 2, 1), (2, 3, 1), (3, 1, 1)]);
        let outcome = EulerCircuit::run(&g, EulerConfig::default());
        assert!(outcome.exists);
        assert_valid_circuit(&g, &outcome.circuit);
    }
}
