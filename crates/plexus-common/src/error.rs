// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("graph must have at least one vertex")]
    ZeroOrder,

    #[error("vertex {vertex} out of range for graph of {order} vertices")]
    VertexOutOfRange { vertex: usize, order: usize },

    /// A second undirected edge between the same endpoints, or a second
    /// self-loop on the same vertex.
    #[error("edge {u}--{v} already present")]
    DuplicateEdge { u: usize, v: usize },

    #[error("edge weight must be at least 1, got {weight}")]
    InvalidWeight { weight: u32 },
}

pub type Result<T> = std::result::Result<T, GraphError>;
