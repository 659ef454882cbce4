// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Minimum spanning tree (Prim's algorithm).
//!
//! Builds a dense weight matrix from the adjacency lists (0 = no edge,
//! self-loops ignored) and grows the tree from vertex 0 with a binary
//! min-heap keyed by edge weight. Ties go to the first-encountered edge.
//! On a disconnected graph the outcome reports `connected = false` and no
//! edges.

use crate::Algorithm;
use plexus_common::graph::Graph;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

pub struct MinimumSpanningTree;

#[derive(Debug, Clone, Default)]
pub struct MstConfig {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MstOutcome {
    pub connected: bool,
    /// Tree edges as `(parent, vertex, weight)`, empty when disconnected.
    pub edges: Vec<(usize, usize, u32)>,
    pub total_weight: u64,
}

impl Algorithm for MinimumSpanningTree {
    type Config = MstConfig;
    type Output = MstOutcome;

    fn name() -> &'static str {
        "mst"
    }

    fn run(graph: &Graph, _config: Self::Config) -> Self::Output {
        let n = graph.vertex_count();
        if n == 1 {
            // A single vertex is trivially connected.
            return MstOutcome {
                connected: true,
                edges: Vec::new(),
                total_weight: 0,
            };
        }

        let weights = weight_matrix(graph);

        let mut in_tree = vec![false; n];
        let mut key = vec![u32::MAX; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        key[0] = 0;
        heap.push(Reverse((0u32, 0usize)));

        while let Some(Reverse((_, u))) = heap.pop() {
            if in_tree[u] {
                continue;
            }
            in_tree[u] = true;

            for v in 0..n {
                let w = weights[u][v];
                if w > 0 && !in_tree[v] && w < key[v] {
                    key[v] = w;
                    parent[v] = Some(u);
                    heap.push(Reverse((w, v)));
                }
            }
        }

        if in_tree.iter().any(|&reached| !reached) {
            return MstOutcome {
                connected: false,
                edges: Vec::new(),
                total_weight: 0,
            };
        }

        let mut edges = Vec::with_capacity(n - 1);
        let mut total_weight = 0u64;
        for v in 1..n {
            if let Some(p) = parent[v] {
                let w = weights[p][v];
                edges.push((p, v, w));
                total_weight += u64::from(w);
            }
        }

        MstOutcome {
            connected: true,
            edges,
            total_weight,
        }
    }
}

fn weight_matrix(graph: &Graph) -> Vec<Vec<u32>> {
    let n = graph.vertex_count();
    let mut matrix = vec![vec![0u32; n]; n];
    for u in 0..n {
        for e in graph.neighbors(u) {
            if e.to != u {
                matrix[u][e.to] = e.weight;
            }
        }
    }
    matrix
}
