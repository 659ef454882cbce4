// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! TCP front-ends for the graph-analysis service.
//!
//! Three server modes share the algorithm library:
//!
//! - [`pipeline`]: every job flows through a fixed 4-stage queue pipeline
//!   (MST, max-flow, max-clique, clique-count) and receives one
//!   consolidated report.
//! - [`dispatch`]: per-connection request/reply; each request names one
//!   algorithm by id and gets a single framed response.
//! - [`pool`]: the same request/reply protocol served by a leader-follower
//!   worker pool sharing one listener.
//!
//! All modes shut down cooperatively through a [`shutdown`] handle; queue
//! and accept operations are the only suspension points that observe it.

pub mod dispatch;
pub mod job;
pub mod pipeline;
pub mod pool;
pub mod queue;
pub mod shutdown;
pub mod wire;
