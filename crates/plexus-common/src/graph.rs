// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Undirected adjacency-list graph over vertices `0..n`.
//!
//! Each undirected edge `u--v` is stored as two mirrored incidences
//! (`u -> v` and `v -> u`) carrying the same weight; a self-loop is stored
//! as two `u -> u` incidences, so every self-loop contributes 2 to its
//! vertex's degree. The simple-graph policy rejects a second edge between
//! the same endpoints and a second self-loop on the same vertex.

use crate::error::GraphError;
use std::fmt;

/// Incidence stored in a vertex's adjacency list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeEntry {
    pub to: usize,
    pub weight: u32,
}

/// Undirected weighted graph with a fixed vertex count.
#[derive(Debug)]
pub struct Graph {
    n: usize,
    adj: Vec<Vec<EdgeEntry>>,
}

impl Graph {
    /// Creates a graph with `n` vertices and no edges.
    pub fn new(n: usize) -> Result<Self, GraphError> {
        if n == 0 {
            return Err(GraphError::ZeroOrder);
        }
        Ok(Self {
            n,
            adj: vec![Vec::new(); n],
        })
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Returns the number of undirected edges (a self-loop counts once).
    pub fn edge_count(&self) -> usize {
        let incidences: usize = self.adj.iter().map(|list| list.len()).sum();
        incidences / 2
    }

    /// Adds an undirected edge `u--v` with weight 1.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        self.add_weighted_edge(u, v, 1)
    }

    /// Adds an undirected edge `u--v` with the given weight.
    ///
    /// Both mirrored incidences are inserted, or neither: capacity is
    /// reserved up front so a partially linked edge is never observable.
    ///
    /// # Errors
    ///
    /// `VertexOutOfRange` if an endpoint is not in `[0, n)`, `InvalidWeight`
    /// if `weight == 0`, `DuplicateEdge` if the edge (or, for `u == v`, a
    /// self-loop on that vertex) is already present.
    pub fn add_weighted_edge(&mut self, u: usize, v: usize, weight: u32) -> Result<(), GraphError> {
        self.check_bounds(u)?;
        self.check_bounds(v)?;
        if weight == 0 {
            return Err(GraphError::InvalidWeight { weight });
        }
        if self.edge_exists(u, v) {
            return Err(GraphError::DuplicateEdge { u, v });
        }

        if u == v {
            // Self-loop: two entries on the same list.
            self.adj[u].reserve(2);
            self.adj[u].push(EdgeEntry { to: u, weight });
            self.adj[u].push(EdgeEntry { to: u, weight });
        } else {
            self.adj[u].reserve(1);
            self.adj[v].reserve(1);
            self.adj[u].push(EdgeEntry { to: v, weight });
            self.adj[v].push(EdgeEntry { to: u, weight });
        }
        Ok(())
    }

    /// Returns the weight of the edge `u--v`, or 0 if no such edge exists
    /// (or either endpoint is out of range).
    pub fn weight(&self, u: usize, v: usize) -> u32 {
        if u >= self.n || v >= self.n {
            return 0;
        }
        self.adj[u]
            .iter()
            .find(|e| e.to == v)
            .map(|e| e.weight)
            .unwrap_or(0)
    }

    /// Returns the incidence list of `v`. O(1).
    pub fn neighbors(&self, v: usize) -> &[EdgeEntry] {
        self.adj.get(v).map(|list| list.as_slice()).unwrap_or(&[])
    }

    /// Returns the degree of `v`; a self-loop contributes 2.
    pub fn degree(&self, v: usize) -> usize {
        self.neighbors(v).len()
    }

    /// Whether any edge carries a weight other than 1.
    pub fn has_weights(&self) -> bool {
        self.adj
            .iter()
            .any(|list| list.iter().any(|e| e.weight != 1))
    }

    /// Undirected connectivity over the vertices of nonzero degree.
    ///
    /// An edgeless graph is vacuously connected.
    pub fn is_connected_ignoring_isolated(&self) -> bool {
        let Some(start) = (0..self.n).find(|&v| self.degree(v) > 0) else {
            return true;
        };

        let mut visited = vec![false; self.n];
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(u) = stack.pop() {
            for e in &self.adj[u] {
                if !visited[e.to] {
                    visited[e.to] = true;
                    stack.push(e.to);
                }
            }
        }

        (0..self.n).all(|v| self.degree(v) == 0 || visited[v])
    }

    fn check_bounds(&self, v: usize) -> Result<(), GraphError> {
        if v >= self.n {
            return Err(GraphError::VertexOutOfRange {
                vertex: v,
                order: self.n,
            });
        }
        Ok(())
    }

    fn edge_exists(&self, u: usize, v: usize) -> bool {
        let count = self.adj[u].iter().filter(|e| e.to == v).count();
        if u == v { count >= 2 } else { count >= 1 }
    }
}

impl fmt::Display for Graph {
    /// One line per vertex; weights are shown iff any edge weight differs
    /// from 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show_weights = self.has_weights();
        for v in 0..self.n {
            write!(f, "{v}:")?;
            for e in &self.adj[v] {
                if show_weights {
                    write!(f, " {}(w:{})", e.to, e.weight)?;
                } else {
                    write!(f, " {}", e.to)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_order() {
        assert_eq!(Graph::new(0).unwrap_err(), GraphError::ZeroOrder);
        assert_eq!(Graph::new(1).unwrap().vertex_count(), 1);
    }

    #[test]
    fn test_edge_is_mirrored() {
        let mut g = Graph::new(3).unwrap();
        g.add_weighted_edge(0, 1, 5).unwrap();

        assert_eq!(g.neighbors(0), &[EdgeEntry { to: 1, weight: 5 }]);
        assert_eq!(g.neighbors(1), &[EdgeEntry { to: 0, weight: 5 }]);
        assert_eq!(g.weight(0, 1), 5);
        assert_eq!(g.weight(1, 0), 5);
        assert_eq!(g.weight(0, 2), 0);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let mut g = Graph::new(2).unwrap();
        g.add_edge(0, 0).unwrap();

        assert_eq!(g.degree(0), 2);
        assert_eq!(g.edge_count(), 1);
        // Second self-loop on the same vertex is a duplicate.
        assert_eq!(
            g.add_edge(0, 0).unwrap_err(),
            GraphError::DuplicateEdge { u: 0, v: 0 }
        );
        assert_eq!(g.degree(0), 2);
    }

    #[test]
    fn test_duplicate_leaves_graph_unchanged() {
        let mut g = Graph::new(3).unwrap();
        g.add_weighted_edge(0, 1, 2).unwrap();
        assert_eq!(
            g.add_weighted_edge(1, 0, 7).unwrap_err(),
            GraphError::DuplicateEdge { u: 1, v: 0 }
        );

        assert_eq!(g.weight(0, 1), 2);
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(1), 1);
    }

    #[test]
    fn test_bounds_and_weight_validation() {
        let mut g = Graph::new(2).unwrap();
        assert_eq!(
            g.add_edge(0, 2).unwrap_err(),
            GraphError::VertexOutOfRange {
                vertex: 2,
                order: 2
            }
        );
        assert_eq!(
            g.add_weighted_edge(0, 1, 0).unwrap_err(),
            GraphError::InvalidWeight { weight: 0 }
        );
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_connectivity_ignores_isolated() {
        let mut g = Graph::new(4).unwrap();
        assert!(g.is_connected_ignoring_isolated());

        g.add_edge(0, 1).unwrap();
        // Vertices 2 and 3 are isolated and do not count.
        assert!(g.is_connected_ignoring_isolated());

        g.add_edge(2, 3).unwrap();
        assert!(!g.is_connected_ignoring_isolated());

        g.add_edge(1, 2).unwrap();
        assert!(g.is_connected_ignoring_isolated());
    }

    #[test]
    fn test_display_shows_weights_only_when_weighted() {
        let mut g = Graph::new(2).unwrap();
        g.add_edge(0, 1).unwrap();
        assert_eq!(g.to_string(), "0: 1\n1: 0\n");

        let mut g = Graph::new(2).unwrap();
        g.add_weighted_edge(0, 1, 3).unwrap();
        assert_eq!(g.to_string(), "0: 1(w:3)\n1: 0(w:3)\n");
    }
}
