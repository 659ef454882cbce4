// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Strategy dispatch for the wire-protocol algorithm ids.
//!
//! Dispatch is two-step: an id resolves to an [`AlgorithmKind`], and the
//! kind resolves to a [`Strategy`] record holding the execute function plus
//! its name and description. `run` is the uniform entry point used by the
//! request/reply front-ends; unknown ids yield an in-band string starting
//! with `"Factory Error:"`, which callers distinguish from results by the
//! leading token.

use crate::{
    Algorithm, CliqueCount, CliqueCountConfig, EulerCircuit, EulerConfig, MaxCliqueConfig,
    MaximumClique, MinimumSpanningTree, MstConfig, max_flow_default,
};
use plexus_common::graph::Graph;
use std::fmt::Write as _;
use tracing::{debug, warn};

/// MST summaries longer than this are cut off with an explicit marker.
const MST_SUMMARY_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Euler,
    MaxFlow,
    Mst,
    MaxClique,
    CliqueCount,
}

impl AlgorithmKind {
    /// Maps a wire-protocol id onto an algorithm kind.
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Euler),
            2 => Some(Self::MaxFlow),
            3 => Some(Self::Mst),
            4 => Some(Self::MaxClique),
            5 => Some(Self::CliqueCount),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Self::Euler => 1,
            Self::MaxFlow => 2,
            Self::Mst => 3,
            Self::MaxClique => 4,
            Self::CliqueCount => 5,
        }
    }

    /// Whether the single-shot request for this kind carries weighted edge
    /// triples (as opposed to an adjacency matrix).
    pub fn is_weighted(self) -> bool {
        matches!(self, Self::MaxFlow | Self::Mst)
    }
}

/// One dispatchable algorithm: the execute function plus its registry
/// metadata.
pub struct Strategy {
    pub kind: AlgorithmKind,
    pub name: &'static str,
    pub description: &'static str,
    execute: fn(&Graph) -> String,
}

impl Strategy {
    /// Runs the algorithm and formats its one-line summary.
    pub fn execute(&self, graph: &Graph) -> String {
        (self.execute)(graph)
    }
}

/// Immutable table of the five strategies, keyed by [`AlgorithmKind`].
pub struct StrategyRegistry {
    strategies: Vec<Strategy>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Strategy {
                    kind: AlgorithmKind::Euler,
                    name: "euler",
                    description: "Find Euler Circuit",
                    execute: euler_summary,
                },
                Strategy {
                    kind: AlgorithmKind::MaxFlow,
                    name: "maxflow",
                    description: "Maximum Flow (Edmonds-Karp)",
                    execute: max_flow_summary,
                },
                Strategy {
                    kind: AlgorithmKind::Mst,
                    name: "mst",
                    description: "Minimum Spanning Tree (Prim's)",
                    execute: mst_summary,
                },
                Strategy {
                    kind: AlgorithmKind::MaxClique,
                    name: "maxclique",
                    description: "Maximum Clique",
                    execute: max_clique_summary,
                },
                Strategy {
                    kind: AlgorithmKind::CliqueCount,
                    name: "cliquecount",
                    description: "Count All Cliques",
                    execute: clique_count_summary,
                },
            ],
        }
    }

    pub fn get(&self, kind: AlgorithmKind) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.kind == kind)
    }

    pub fn by_name(&self, name: &str) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.name == name)
    }

    pub fn list(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.iter()
    }

    /// Resolves `id` and executes the matching strategy.
    ///
    /// Unknown ids return an in-band error string beginning with
    /// `"Factory Error:"`.
    pub fn run(&self, graph: &Graph, id: i32) -> String {
        let Some(kind) = AlgorithmKind::from_id(id) else {
            warn!(id, "dispatch rejected unknown algorithm id");
            return format!("Factory Error: Invalid algorithm ID {id}");
        };

        match self.get(kind) {
            Some(strategy) => {
                debug!(id, strategy = strategy.name, "dispatching algorithm");
                strategy.execute(graph)
            }
            None => "Factory Error: Strategy creation failed".to_string(),
        }
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn euler_summary(graph: &Graph) -> String {
    let outcome = EulerCircuit::run(graph, EulerConfig::default());
    if outcome.exists {
        format!("Euler circuit found (length: {})", outcome.circuit.len())
    } else {
        "No Euler circuit exists".to_string()
    }
}

fn max_flow_summary(graph: &Graph) -> String {
    match max_flow_default(graph) {
        Ok(flow) => format!("Max flow is: {}", flow.value),
        Err(_) => "Max flow calculation failed".to_string(),
    }
}

fn mst_summary(graph: &Graph) -> String {
    let outcome = MinimumSpanningTree::run(graph, MstConfig::default());
    if !outcome.connected {
        return "MST calculation failed (graph not connected)".to_string();
    }

    let mut summary = format!("MST weight: {}, Edges: ", outcome.total_weight);
    for (i, (u, v, w)) in outcome.edges.iter().enumerate() {
        if i > 0 {
            summary.push_str(", ");
        }
        let _ = write!(summary, "{u}-{v}({w})");
        if summary.len() >= MST_SUMMARY_LIMIT {
            summary.truncate(MST_SUMMARY_LIMIT);
            summary.push_str("...[truncated]");
            break;
        }
    }
    summary
}

fn max_clique_summary(graph: &Graph) -> String {
    let outcome = MaximumClique::run(graph, MaxCliqueConfig::default());
    format!("Max clique size is: {}", outcome.size)
}

fn clique_count_summary(graph: &Graph) -> String {
    let outcome = CliqueCount::run(graph, CliqueCountConfig::default());
    format!("Total cliques count is: {}", outcome.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::graph_from_edges;
    use plexus_common::graph::Graph;

    fn triangle() -> Graph {
        graph_from_edges(3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)])
    }

    #[test]
    fn test_id_mapping_is_fixed() {
        assert_eq!(AlgorithmKind::from_id(1), Some(AlgorithmKind::Euler));
        assert_eq!(AlgorithmKind::from_id(2), Some(AlgorithmKind::MaxFlow));
        assert_eq!(AlgorithmKind::from_id(3), Some(AlgorithmKind::Mst));
        assert_eq!(AlgorithmKind::from_id(4), Some(AlgorithmKind::MaxClique));
        assert_eq!(AlgorithmKind::from_id(5), Some(AlgorithmKind::CliqueCount));
        assert_eq!(AlgorithmKind::from_id(0), None);
        assert_eq!(AlgorithmKind::from_id(6), None);

        for id in 1..=5 {
            assert_eq!(AlgorithmKind::from_id(id).unwrap().id(), id);
        }
    }

    #[test]
    fn test_registry_holds_five_strategies() {
        let registry = StrategyRegistry::new();
        assert_eq!(registry.list().count(), 5);
        for kind in [
            AlgorithmKind::Euler,
            AlgorithmKind::MaxFlow,
            AlgorithmKind::Mst,
            AlgorithmKind::MaxClique,
            AlgorithmKind::CliqueCount,
        ] {
            assert_eq!(registry.get(kind).unwrap().kind, kind);
        }
        assert_eq!(registry.by_name("mst").unwrap().kind, AlgorithmKind::Mst);
        assert!(registry.by_name("nope").is_none());
    }

    #[test]
    fn test_run_formats_summaries() {
        let registry = StrategyRegistry::new();
        let g = triangle();

        assert_eq!(registry.run(&g, 1), "Euler circuit found (length: 4)");
        assert_eq!(registry.run(&g, 2), "Max flow is: 2");
        assert_eq!(registry.run(&g, 4), "Max clique size is: 3");
        assert_eq!(registry.run(&g, 5), "Total cliques count is: 7");
        assert!(registry.run(&g, 3).starts_with("MST weight: 2, Edges: "));
    }

    #[test]
    fn test_unknown_id_yields_factory_error() {
        let registry = StrategyRegistry::new();
        let g = triangle();

        assert_eq!(registry.run(&g, 9), "Factory Error: Invalid algorithm ID 9");
        assert!(registry.run(&g, -1).starts_with("Factory Error:"));
    }

    #[test]
    fn test_failure_summaries_are_in_band() {
        let disconnected = graph_from_edges(4, &[(0, 1, 5)]);
        let registry = StrategyRegistry::new();
        assert_eq!(
            registry.run(&disconnected, 3),
            "MST calculation failed (graph not connected)"
        );

        let single = Graph::new(1).unwrap();
        assert_eq!(registry.run(&single, 2), "Max flow calculation failed");
        assert_eq!(registry.run(&single, 1), "No Euler circuit exists");
    }

    #[test]
    fn test_long_mst_summary_is_truncated() {
        // A path graph long enough to overflow the summary limit.
        let n = 200;
        let mut g = Graph::new(n).unwrap();
        for v in 1..n {
            g.add_weighted_edge(v - 1, v, 7).unwrap();
        }

        let registry = StrategyRegistry::new();
        let summary = registry.run(&g, 3);
        assert!(summary.ends_with("...[truncated]"));
        assert!(summary.len() <= MST_SUMMARY_LIMIT + "...[truncated]".len());
    }
}
