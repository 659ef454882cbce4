// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Binary wire codecs for both client protocols.
//!
//! All integers are 4-byte `i32` in host byte order.
//!
//! Pipeline requests are length-prefixed: a `[seed, max_weight, vertices]`
//! header, an edge count, then that many `[u, v, w]` triples. Single-shot
//! requests are self-framing: the algorithm id determines whether an
//! `n * n` adjacency matrix (ids 1, 4, 5) or an edge-triple list
//! (ids 2, 3) follows. Single-shot responses are a `[status, length]`
//! header followed by `length + 1` bytes of NUL-terminated text on
//! success; failures carry `status = 0` and no body.

use plexus_algo::AlgorithmKind;
use plexus_common::config::LimitsConfig;
use plexus_common::error::GraphError;
use plexus_common::graph::Graph;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("vertex count {0} out of range")]
    BadVertexCount(i32),

    #[error("edge count {0} out of range")]
    BadEdgeCount(i32),

    #[error("edge ({u}, {v}, {w}) invalid for {order} vertices")]
    BadEdge { u: i32, v: i32, w: i32, order: usize },

    #[error("unknown algorithm id {0}")]
    BadAlgorithmId(i32),

    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A parsed pipeline job submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub seed: i32,
    pub max_weight: i32,
    pub vertices: usize,
    pub edges: Vec<(usize, usize, u32)>,
}

/// A parsed single-shot request: the algorithm id plus the graph built from
/// its payload.
#[derive(Debug)]
pub struct DispatchRequest {
    pub algorithm_id: i32,
    pub graph: Graph,
}

/// Reads one `i32`, returning `None` on a clean EOF before the first byte.
pub async fn read_i32_or_eof<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> std::io::Result<Option<i32>> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        filled += n;
    }
    Ok(Some(i32::from_ne_bytes(buf)))
}

async fn read_i32<R: AsyncRead + Unpin>(reader: &mut R) -> std::io::Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).await?;
    Ok(i32::from_ne_bytes(buf))
}

async fn read_i32s<R: AsyncRead + Unpin>(
    reader: &mut R,
    count: usize,
) -> std::io::Result<Vec<i32>> {
    let mut bytes = vec![0u8; count * 4];
    reader.read_exact(&mut bytes).await?;
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Writes a slice of `i32` values in host byte order.
pub async fn write_i32s<W: AsyncWrite + Unpin>(
    writer: &mut W,
    values: &[i32],
) -> std::io::Result<()> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for value in values {
        bytes.extend_from_slice(&value.to_ne_bytes());
    }
    writer.write_all(&bytes).await
}

/// Reads and validates a pipeline job submission.
pub async fn read_pipeline_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    limits: &LimitsConfig,
) -> Result<PipelineRequest, WireError> {
    let header = read_i32s(reader, 3).await?;
    let (seed, max_weight, vertices) = (header[0], header[1], header[2]);
    if vertices <= 0 || vertices as usize > limits.max_vertices {
        return Err(WireError::BadVertexCount(vertices));
    }
    let order = vertices as usize;

    let num_edges = read_i32(reader).await?;
    if num_edges < 0 || num_edges as usize > limits.max_edges {
        return Err(WireError::BadEdgeCount(num_edges));
    }

    let raw = read_i32s(reader, num_edges as usize * 3).await?;
    let mut edges = Vec::with_capacity(num_edges as usize);
    for triple in raw.chunks_exact(3) {
        let (u, v, w) = (triple[0], triple[1], triple[2]);
        edges.push(validate_edge(u, v, w, order)?);
    }

    Ok(PipelineRequest {
        seed,
        max_weight,
        vertices: order,
        edges,
    })
}

/// Reads one single-shot request, or `None` on a clean EOF between
/// requests.
pub async fn read_dispatch_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    limits: &LimitsConfig,
) -> Result<Option<DispatchRequest>, WireError> {
    let Some(algorithm_id) = read_i32_or_eof(reader).await? else {
        return Ok(None);
    };
    let Some(kind) = AlgorithmKind::from_id(algorithm_id) else {
        return Err(WireError::BadAlgorithmId(algorithm_id));
    };

    let n = read_i32(reader).await?;
    if n <= 0 || n as usize > limits.max_vertices {
        return Err(WireError::BadVertexCount(n));
    }
    let order = n as usize;

    let graph = if kind.is_weighted() {
        let num_edges = read_i32(reader).await?;
        if num_edges < 0 || num_edges as usize > order * order {
            return Err(WireError::BadEdgeCount(num_edges));
        }
        let raw = read_i32s(reader, num_edges as usize * 3).await?;
        let mut edges = Vec::with_capacity(num_edges as usize);
        for triple in raw.chunks_exact(3) {
            edges.push(validate_edge(triple[0], triple[1], triple[2], order)?);
        }
        assemble_graph(order, &edges)?
    } else {
        let matrix = read_i32s(reader, order * order).await?;
        let mut graph = Graph::new(order)?;
        for u in 0..order {
            for v in u..order {
                if matrix[u * order + v] == 1 {
                    graph.add_edge(u, v)?;
                }
            }
        }
        graph
    };

    Ok(Some(DispatchRequest {
        algorithm_id,
        graph,
    }))
}

/// Writes a single-shot response; `None` is the failure form
/// (`status = 0`, no body).
pub async fn write_dispatch_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    result: Option<&str>,
) -> std::io::Result<()> {
    match result {
        None => write_i32s(writer, &[0, 0]).await,
        Some(text) => {
            write_i32s(writer, &[1, text.len() as i32]).await?;
            writer.write_all(text.as_bytes()).await?;
            writer.write_all(&[0]).await
        }
    }
}

/// Reads a single-shot response; `None` is the failure form. Used by the
/// test client.
pub async fn read_dispatch_response<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> std::io::Result<Option<String>> {
    let header = read_i32s(reader, 2).await?;
    let (status, length) = (header[0], header[1]);
    if status != 1 {
        return Ok(None);
    }

    let mut body = vec![0u8; length as usize + 1];
    reader.read_exact(&mut body).await?;
    body.pop(); // trailing NUL
    Ok(Some(String::from_utf8_lossy(&body).into_owned()))
}

/// Builds a graph from validated edge triples, skipping duplicates with a
/// log line.
pub fn assemble_graph(order: usize, edges: &[(usize, usize, u32)]) -> Result<Graph, GraphError> {
    let mut graph = Graph::new(order)?;
    for &(u, v, w) in edges {
        match graph.add_weighted_edge(u, v, w) {
            Ok(()) => {}
            Err(GraphError::DuplicateEdge { u, v }) => {
                warn!(u, v, "duplicate edge skipped");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(graph)
}

fn validate_edge(
    u: i32,
    v: i32,
    w: i32,
    order: usize,
) -> Result<(usize, usize, u32), WireError> {
    if u < 0 || v < 0 || u as usize >= order || v as usize >= order || w <= 0 {
        return Err(WireError::BadEdge { u, v, w, order });
    }
    Ok((u as usize, v as usize, w as u32))
}
