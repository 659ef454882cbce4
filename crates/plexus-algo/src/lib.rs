// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Graph algorithm library.
//!
//! One module per algorithm, each a unit struct implementing [`Algorithm`]
//! with its own `Config` and outcome types. The [`registry`] module maps the
//! compact wire-protocol algorithm ids onto these implementations and
//! formats their one-line summaries.

use plexus_common::graph::Graph;
use thiserror::Error;

/// Core trait for all graph algorithms.
pub trait Algorithm: Send + Sync {
    /// Algorithm parameters.
    type Config: Default + Clone + Send + 'static;
    /// Outcome type.
    type Output: Send + 'static;

    /// Algorithm identifier.
    fn name() -> &'static str;

    /// Execute the algorithm on a graph.
    fn run(graph: &Graph, config: Self::Config) -> Self::Output;
}

/// Errors surfaced by algorithms with input preconditions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AlgoError {
    #[error("source and sink must be distinct vertices")]
    IdenticalEndpoints,

    #[error("vertex {vertex} out of range for graph of {order} vertices")]
    VertexOutOfRange { vertex: usize, order: usize },

    #[error("flow requires at least two vertices, graph has {order}")]
    TooFewVertices { order: usize },
}

mod euler;
pub use euler::{EulerCircuit, EulerConfig, EulerOutcome, has_circuit};

mod mst;
pub use mst::{MinimumSpanningTree, MstConfig, MstOutcome};

mod max_flow;
pub use max_flow::{FlowOutcome, MaxFlow, MaxFlowConfig, max_flow, max_flow_default};

mod max_clique;
pub use max_clique::{CliqueOutcome, MaxCliqueConfig, MaximumClique, is_clique, maximal_cliques};

mod clique_count;
pub use clique_count::{
    CliqueCount, CliqueCountConfig, CountOutcome, count_of_size, count_triangles,
};

pub mod registry;
pub use registry::{AlgorithmKind, Strategy, StrategyRegistry};

#[cfg(test)]
pub(crate) mod test_utils {
    use plexus_common::graph::Graph;

    /// Builds a graph from weighted edge triples.
    pub fn graph_from_edges(n: usize, edges: &[(usize, usize, u32)]) -> Graph {
        let mut g = Graph::new(n).unwrap();
        for &(u, v, w) in edges {
            g.add_weighted_edge(u, v, w).unwrap();
        }
        g
    }
}
