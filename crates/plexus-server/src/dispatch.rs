// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Per-connection request/reply front-end.
//!
//! Each connection carries any number of sequential single-shot requests;
//! the handler loops until a clean EOF. A malformed request gets the
//! failure response (`status = 0`) and the connection is dropped, since the
//! stream framing can no longer be trusted.

use crate::shutdown::Shutdown;
use crate::wire::{self, WireError};
use anyhow::Result;
use plexus_algo::StrategyRegistry;
use plexus_common::config::LimitsConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// Totals reported after a clean shutdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchSummary {
    pub requests: u64,
}

/// Serves the single-shot protocol on `listener` until shutdown.
pub async fn serve(listener: TcpListener, mut shutdown: Shutdown) -> Result<DispatchSummary> {
    let addr = listener.local_addr()?;
    info!(%addr, "dispatch server listening");

    let registry = Arc::new(StrategyRegistry::new());
    let limits = LimitsConfig::default();
    let requests = Arc::new(AtomicU64::new(0));

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    debug!(%peer, "client connected");
                    let registry = registry.clone();
                    let requests = requests.clone();
                    let shutdown = shutdown.clone();
                    tokio::spawn(async move {
                        handle_connection(stream, &registry, limits, &requests, shutdown).await;
                    });
                }
                Err(e) => warn!(error = %e, "accept failed"),
            },
            _ = shutdown.triggered() => break,
        }
    }

    let summary = DispatchSummary {
        requests: requests.load(Ordering::Relaxed),
    };
    info!(requests = summary.requests, "dispatch server stopped");
    Ok(summary)
}

/// Serves sequential requests on one connection until EOF, error, or
/// shutdown. Shared with the leader-follower pool.
pub(crate) async fn handle_connection(
    mut stream: TcpStream,
    registry: &StrategyRegistry,
    limits: LimitsConfig,
    requests: &AtomicU64,
    mut shutdown: Shutdown,
) {
    loop {
        let request = tokio::select! {
            request = wire::read_dispatch_request(&mut stream, &limits) => request,
            _ = shutdown.triggered() => break,
        };

        match request {
            Ok(None) => break,
            Ok(Some(request)) => {
                let result = registry.run(&request.graph, request.algorithm_id);
                requests.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("plexus_requests_total").increment(1);
                debug!(
                    algorithm = request.algorithm_id,
                    vertices = request.graph.vertex_count(),
                    "request served"
                );
                if let Err(e) = wire::write_dispatch_response(&mut stream, Some(&result)).await {
                    warn!(error = %e, "failed to write response");
                    break;
                }
            }
            Err(WireError::Io(e)) => {
                warn!(error = %e, "connection error");
                break;
            }
            Err(e) => {
                warn!(error = %e, "rejecting request");
                let _ = wire::write_dispatch_response(&mut stream, None).await;
                break;
            }
        }
    }
}
