// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Test clients for both wire protocols.
//!
//! Graphs are generated from a seed so runs are reproducible; duplicate
//! random edges are allowed here and skipped server-side.

use anyhow::{Context, Result, bail};
use plexus_algo::StrategyRegistry;
use plexus_server::wire;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

/// Submits one job to a pipeline server and returns its report.
pub async fn submit(
    addr: &str,
    vertices: usize,
    edges: usize,
    max_weight: u32,
    seed: u64,
) -> Result<String> {
    if vertices == 0 {
        bail!("graph needs at least one vertex");
    }
    let triples = random_edges(vertices, edges, max_weight, seed);

    let mut stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("failed to connect to {addr}"))?;

    let mut payload = vec![
        seed as i32,
        max_weight as i32,
        vertices as i32,
        triples.len() as i32,
    ];
    for &(u, v, w) in &triples {
        payload.extend([u as i32, v as i32, w as i32]);
    }
    wire::write_i32s(&mut stream, &payload).await?;

    let mut report = String::new();
    stream.read_to_string(&mut report).await?;
    if report.is_empty() {
        bail!("no reply from server");
    }
    Ok(report)
}

/// Sends one single-shot request and returns the server's reply text, or
/// `None` on a failure response.
pub async fn request(
    addr: &str,
    algorithm: &str,
    vertices: usize,
    edges: usize,
    max_weight: u32,
    seed: u64,
) -> Result<Option<String>> {
    if vertices == 0 {
        bail!("graph needs at least one vertex");
    }
    let registry = StrategyRegistry::new();
    let Some(strategy) = registry.by_name(algorithm) else {
        bail!(
            "unknown algorithm '{algorithm}' (expected one of: {})",
            registry
                .list()
                .map(|s| s.name)
                .collect::<Vec<_>>()
                .join(", ")
        );
    };
    let kind = strategy.kind;
    let triples = random_edges(vertices, edges, max_weight, seed);

    let mut stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("failed to connect to {addr}"))?;

    let mut payload = vec![kind.id(), vertices as i32];
    if kind.is_weighted() {
        payload.push(triples.len() as i32);
        for &(u, v, w) in &triples {
            payload.extend([u as i32, v as i32, w as i32]);
        }
    } else {
        let mut matrix = vec![0i32; vertices * vertices];
        for &(u, v, _) in &triples {
            matrix[u * vertices + v] = 1;
            matrix[v * vertices + u] = 1;
        }
        payload.extend(matrix);
    }
    wire::write_i32s(&mut stream, &payload).await?;

    let reply = wire::read_dispatch_response(&mut stream).await?;
    Ok(reply)
}

/// Seeded random edge triples; self-loops are not generated, duplicates
/// may be.
fn random_edges(vertices: usize, edges: usize, max_weight: u32, seed: u64) -> Vec<(usize, usize, u32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut triples = Vec::with_capacity(edges);
    if vertices < 2 {
        return triples;
    }
    while triples.len() < edges {
        let u = rng.random_range(0..vertices);
        let v = rng.random_range(0..vertices);
        if u == v {
            continue;
        }
        let w = rng.random_range(1..=max_weight.max(1));
        triples.push((u, v, w));
    }
    triples
}
