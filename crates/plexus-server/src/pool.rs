// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Leader-follower worker pool front-end.
//!
//! A fixed set of workers shares the listening socket. The leader index
//! lives in a watch channel: exactly one worker at a time observes its own
//! id there and awaits `accept`. On accepting, the leader promotes the next
//! worker round-robin and downgrades itself to handle the connection, so
//! there is exactly one leader at all times except during the atomic
//! handoff. Shutdown releases every waiting follower and the current leader
//! at its accept point.

use crate::dispatch::handle_connection;
use crate::shutdown::Shutdown;
use anyhow::Result;
use plexus_algo::StrategyRegistry;
use plexus_common::config::{LimitsConfig, PoolConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Totals reported after a clean shutdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolSummary {
    pub requests: u64,
}

/// Serves the single-shot protocol with a leader-follower pool until
/// shutdown.
pub async fn serve(
    listener: TcpListener,
    config: PoolConfig,
    shutdown: Shutdown,
) -> Result<PoolSummary> {
    let addr = listener.local_addr()?;
    let pool_size = config.workers.max(1);
    info!(%addr, workers = pool_size, "leader-follower server listening");

    let listener = Arc::new(listener);
    let registry = Arc::new(StrategyRegistry::new());
    let limits = LimitsConfig::default();
    let requests = Arc::new(AtomicU64::new(0));
    let (leader_tx, leader_rx) = watch::channel(0usize);
    let leader_tx = Arc::new(leader_tx);

    let mut workers = Vec::with_capacity(pool_size);
    for id in 0..pool_size {
        workers.push(tokio::spawn(worker(
            id,
            pool_size,
            listener.clone(),
            leader_tx.clone(),
            leader_rx.clone(),
            registry.clone(),
            limits,
            requests.clone(),
            shutdown.clone(),
        )));
    }

    for handle in workers {
        let _ = handle.await;
    }

    let summary = PoolSummary {
        requests: requests.load(Ordering::Relaxed),
    };
    info!(requests = summary.requests, "leader-follower server stopped");
    Ok(summary)
}

#[allow(clippy::too_many_arguments)]
async fn worker(
    id: usize,
    pool_size: usize,
    listener: Arc<TcpListener>,
    leader_tx: Arc<watch::Sender<usize>>,
    mut leader_rx: watch::Receiver<usize>,
    registry: Arc<StrategyRegistry>,
    limits: LimitsConfig,
    requests: Arc<AtomicU64>,
    mut shutdown: Shutdown,
) {
    debug!(worker = id, "pool worker started");
    loop {
        // Follow until promoted.
        let promoted = tokio::select! {
            observed = leader_rx.wait_for(|&leader| leader == id) => observed.is_ok(),
            _ = shutdown.triggered() => false,
        };
        if !promoted {
            break;
        }
        debug!(worker = id, "worker is leader, accepting");

        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            _ = shutdown.triggered() => break,
        };

        match accepted {
            Ok((stream, peer)) => {
                // Promote the next worker before handling, so the listener
                // is never left without a leader.
                let next = (id + 1) % pool_size;
                leader_tx.send_replace(next);
                debug!(worker = id, %peer, next_leader = next, "accepted, promoted next leader");

                handle_connection(stream, &registry, limits, &requests, shutdown.clone()).await;
                debug!(worker = id, "connection finished, rejoining followers");
            }
            Err(e) => {
                if !shutdown.is_triggered() {
                    warn!(worker = id, error = %e, "accept failed");
                }
            }
        }
    }
    debug!(worker = id, "pool worker exiting");
}
