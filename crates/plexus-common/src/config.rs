// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Bounded capacity of every stage queue (default: 32)
    pub queue_capacity: usize,

    /// Request validation limits shared with the other front-ends
    pub limits: LimitsConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 32,
            limits: LimitsConfig::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Number of leader-follower workers sharing the listener (default: 4)
    pub workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

/// Upper bounds on client-supplied graphs, enforced at the wire layer.
#[derive(Clone, Copy, Debug)]
pub struct LimitsConfig {
    /// Maximum vertex count accepted from a client (default: 50)
    pub max_vertices: usize,

    /// Maximum edge count accepted in a pipeline request (default: 1000)
    pub max_edges: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_vertices: 50,
            max_edges: 1000,
        }
    }
}
