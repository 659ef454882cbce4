// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Maximum flow (Edmonds-Karp).
//!
//! Edge weights act as directed capacities in both directions; self-loops
//! are excluded. Repeatedly BFS the residual matrix for an augmenting path,
//! push the bottleneck, and update forward and reverse residuals until no
//! path remains.

use crate::{AlgoError, Algorithm};
use plexus_common::graph::Graph;
use std::collections::VecDeque;

pub struct MaxFlow;

#[derive(Debug, Clone)]
pub struct MaxFlowConfig {
    pub source: usize,
    pub sink: usize,
}

impl Default for MaxFlowConfig {
    fn default() -> Self {
        Self { source: 0, sink: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutcome {
    pub value: u64,
    pub source: usize,
    pub sink: usize,
}

impl Algorithm for MaxFlow {
    type Config = MaxFlowConfig;
    type Output = Result<FlowOutcome, AlgoError>;

    fn name() -> &'static str {
        "max_flow"
    }

    fn run(graph: &Graph, config: Self::Config) -> Self::Output {
        max_flow(graph, config.source, config.sink)
    }
}

/// Maximum flow from `source` to `sink`.
///
/// # Errors
///
/// `VertexOutOfRange` if either endpoint is not in `[0, n)`,
/// `IdenticalEndpoints` if `source == sink`.
pub fn max_flow(graph: &Graph, source: usize, sink: usize) -> Result<FlowOutcome, AlgoError> {
    let n = graph.vertex_count();
    for endpoint in [source, sink] {
        if endpoint >= n {
            return Err(AlgoError::VertexOutOfRange {
                vertex: endpoint,
                order: n,
            });
        }
    }
    if source == sink {
        return Err(AlgoError::IdenticalEndpoints);
    }

    // Residual capacities; the initial matrix is the capacity matrix.
    let mut residual = vec![vec![0u64; n]; n];
    for u in 0..n {
        for e in graph.neighbors(u) {
            if e.to != u {
                residual[u][e.to] = u64::from(e.weight);
            }
        }
    }

    let mut value = 0u64;
    while let Some(parent) = augmenting_path(&residual, source, sink) {
        let mut bottleneck = u64::MAX;
        let mut v = sink;
        while v != source {
            let u = parent[v].expect("path reaches source");
            bottleneck = bottleneck.min(residual[u][v]);
            v = u;
        }

        let mut v = sink;
        while v != source {
            let u = parent[v].expect("path reaches source");
            residual[u][v] -= bottleneck;
            residual[v][u] += bottleneck;
            v = u;
        }

        value += bottleneck;
    }

    Ok(FlowOutcome {
        value,
        source,
        sink,
    })
}

/// Maximum flow with the default endpoints `source = 0`, `sink = n - 1`.
///
/// # Errors
///
/// `TooFewVertices` if the graph has fewer than two vertices.
pub fn max_flow_default(graph: &Graph) -> Result<FlowOutcome, AlgoError> {
    let n = graph.vertex_count();
    if n < 2 {
        return Err(AlgoError::TooFewVertices { order: n });
    }
    max_flow(graph, 0, n - 1)
}

/// BFS over the residual matrix; returns the parent array when the sink is
/// reachable.
fn augmenting_path(residual: &[Vec<u64>], source: usize, sink: usize) -> Option<Vec<Option<usize>>> {
    let n = residual.len();
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if !visited[v] && residual[u][v] > 0 {
                visited[v] = true;
                parent[v] = Some(u);
                if v == sink {
                    return Some(parent);
                }
                queue.push_back(v);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::graph_from_edges;
    use plexus_common::graph::Graph;

    #[test]
    fn test_series_path_is_bottlenecked() {
        // 0-1 (10), 1-2 (5): flow 0 -> 2 is 5.
        let g = graph_from_edges(3, &[(0, 1, 10), (1, 2, 5)]);
        let flow = max_flow(&g, 0, 2).unwrap();
        assert_eq!(flow.value, 5);
    }

    #[test]
    fn test_unit_triangle_flow() {
        // Unit triangle, 0 -> 2: the direct edge and the 0-1-2 detour each
        // carry 1, and the min cut around the sink is 2.
        let g = graph_from_edges(3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let flow = max_flow_default(&g).unwrap();
        assert_eq!(flow.source, 0);
        assert_eq!(flow.sink, 2);
        assert_eq!(flow.value, 2);
    }

    #[test]
    fn test_parallel_paths_add_up() {
        // Two disjoint 0 -> 3 paths with bottlenecks 3 and 2.
        let g = graph_from_edges(4, &[(0, 1, 3), (1, 3, 4), (0, 2, 2), (2, 3, 2)]);
        let flow = max_flow(&g, 0, 3).unwrap();
        assert_eq!(flow.value, 5);
    }

    #[test]
    fn test_unreachable_sink_has_zero_flow() {
        let g = graph_from_edges(4, &[(0, 1, 5)]);
        let flow = max_flow_default(&g).unwrap();
        assert_eq!(flow.value, 0);
        assert_eq!(flow.sink, 3);
    }

    #[test]
    fn test_endpoint_validation() {
        let g = graph_from_edges(3, &[(0, 1, 1)]);
        assert_eq!(max_flow(&g, 0, 0).unwrap_err(), AlgoError::IdenticalEndpoints);
        assert_eq!(
            max_flow(&g, 0, 7).unwrap_err(),
            AlgoError::VertexOutOfRange { vertex: 7, order: 3 }
        );

        let single = Graph::new(1).unwrap();
        assert_eq!(
            max_flow_default(&single).unwrap_err(),
            AlgoError::TooFewVertices { order: 1 }
        );
    }

    #[test]
    fn test_self_loops_carry_no_capacity() {
        let g = graph_from_edges(2, &[(0, 1, 2), (0, 0, 9)]);
        let flow = max_flow_default(&g).unwrap();
        assert_eq!(flow.value, 2);
    }
}
