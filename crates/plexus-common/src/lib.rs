// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod config;
pub mod error;
pub mod graph;

// Re-exports for convenience
pub use config::{LimitsConfig, PipelineConfig, PoolConfig};
pub use error::{GraphError, Result};
pub use graph::{EdgeEntry, Graph};
