// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! The 4-stage processing pipeline: MST -> MaxFlow -> MaxClique ->
//! CliqueCount.
//!
//! Each stage owns a bounded input queue and one worker task. The acceptor
//! spawns a short-lived intake task per connection that parses the request,
//! builds the graph, and pushes a fresh job into stage 1; the intake lock
//! makes job-id order equal queue order. Stage workers run one algorithm
//! apiece, writing the stringified result into the job's slot; an algorithm
//! failure becomes an error line and the job continues. The terminal stage
//! renders the consolidated report, writes it to the client, and drops the
//! job.

use crate::job::Job;
use crate::queue::{self, Popper, Pusher};
use crate::shutdown::Shutdown;
use crate::wire;
use anyhow::Result;
use parking_lot::Mutex;
use plexus_algo::{
    Algorithm, CliqueCount, CliqueCountConfig, MaxCliqueConfig, MaximumClique,
    MinimumSpanningTree, MstConfig, max_flow_default,
};
use plexus_common::config::PipelineConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

/// Totals reported after a clean shutdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineSummary {
    pub jobs_admitted: u64,
    pub jobs_completed: u64,
}

#[derive(Default)]
struct PipelineStats {
    admitted: u64,
    completed: u64,
}

/// Serves the pipeline protocol on `listener` until shutdown, then drains
/// the stage workers and reports totals.
pub async fn serve(
    listener: TcpListener,
    config: PipelineConfig,
    mut shutdown: Shutdown,
) -> Result<PipelineSummary> {
    let addr = listener.local_addr()?;
    info!(%addr, "pipeline server listening");

    let capacity = config.queue_capacity;
    let (push_mst, pop_mst) = queue::bounded("mst", capacity, shutdown.clone());
    let (push_flow, pop_flow) = queue::bounded("max_flow", capacity, shutdown.clone());
    let (push_clique, pop_clique) = queue::bounded("max_clique", capacity, shutdown.clone());
    let (push_count, pop_count) = queue::bounded("clique_count", capacity, shutdown.clone());

    let stats = Arc::new(Mutex::new(PipelineStats::default()));
    let workers = vec![
        tokio::spawn(relay_stage("mst", pop_mst, push_flow, run_mst)),
        tokio::spawn(relay_stage("max_flow", pop_flow, push_clique, run_max_flow)),
        tokio::spawn(relay_stage(
            "max_clique",
            pop_clique,
            push_count,
            run_max_clique,
        )),
        tokio::spawn(terminal_stage(pop_count, stats.clone())),
    ];
    info!(stages = workers.len(), capacity, "stage workers started");

    let intake = Arc::new(Intake {
        next_job_id: AtomicU64::new(1),
        admission: AsyncMutex::new(()),
        queue: push_mst,
        limits: config.limits,
        stats: stats.clone(),
    });

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    debug!(%peer, "client connected");
                    let intake = intake.clone();
                    tokio::spawn(async move { intake.admit(stream).await });
                }
                Err(e) => warn!(error = %e, "accept failed"),
            },
            _ = shutdown.triggered() => break,
        }
    }

    info!("pipeline shutting down, draining stage workers");
    drop(intake);
    for worker in workers {
        let _ = worker.await;
    }

    let stats = stats.lock();
    let summary = PipelineSummary {
        jobs_admitted: stats.admitted,
        jobs_completed: stats.completed,
    };
    info!(
        admitted = summary.jobs_admitted,
        completed = summary.jobs_completed,
        "pipeline server stopped"
    );
    Ok(summary)
}

/// Per-connection intake shared state.
struct Intake {
    next_job_id: AtomicU64,
    /// Serializes id allocation with the stage-1 push so job ids ascend in
    /// queue order.
    admission: AsyncMutex<()>,
    queue: Pusher<Job>,
    limits: plexus_common::config::LimitsConfig,
    stats: Arc<Mutex<PipelineStats>>,
}

impl Intake {
    async fn admit(&self, mut stream: TcpStream) {
        let request = match wire::read_pipeline_request(&mut stream, &self.limits).await {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "rejecting pipeline request");
                return;
            }
        };

        let graph = match wire::assemble_graph(request.vertices, &request.edges) {
            Ok(graph) => graph,
            Err(e) => {
                warn!(error = %e, "graph construction failed");
                return;
            }
        };

        let guard = self.admission.lock().await;
        let id = self.next_job_id.fetch_add(1, Ordering::Relaxed);
        let job = Job::new(id, graph, stream);
        info!(
            job = id,
            vertices = request.vertices,
            edges = request.edges.len(),
            "job admitted"
        );
        metrics::counter!("plexus_jobs_admitted_total").increment(1);
        self.stats.lock().admitted += 1;

        if self.queue.push(job).await.is_err() {
            warn!(job = id, "pipeline shutting down, job dropped");
        }
        drop(guard);
    }
}

/// A non-terminal stage: transform, then hand the job to the next queue.
async fn relay_stage(
    name: &'static str,
    mut input: Popper<Job>,
    output: Pusher<Job>,
    transform: fn(&mut Job),
) {
    info!(stage = name, "stage worker started");
    while let Some(mut job) = input.pop().await {
        debug!(stage = name, job = job.id, "processing");
        transform(&mut job);
        if output.push(job).await.is_err() {
            // Shutdown raced the handoff; the job (and its graph) is
            // dropped here without reaching the terminal stage.
            break;
        }
    }
    info!(stage = name, "stage worker exiting");
}

/// The terminal stage: last transform, report, socket write, cleanup.
async fn terminal_stage(mut input: Popper<Job>, stats: Arc<Mutex<PipelineStats>>) {
    info!(stage = "clique_count", "stage worker started");
    while let Some(mut job) = input.pop().await {
        debug!(stage = "clique_count", job = job.id, "processing");
        run_clique_count(&mut job);

        let report = job.render_report();
        if let Err(e) = job.stream.write_all(report.as_bytes()).await {
            warn!(job = job.id, error = %e, "failed to write report");
        }
        let _ = job.stream.shutdown().await;

        metrics::counter!("plexus_jobs_completed_total").increment(1);
        stats.lock().completed += 1;
        info!(job = job.id, "job completed");
        // The job is dropped here, destroying its graph.
    }
    info!(stage = "clique_count", "stage worker exiting");
}

fn run_mst(job: &mut Job) {
    let outcome = MinimumSpanningTree::run(&job.graph, MstConfig::default());
    job.results.mst = if outcome.connected {
        format!(
            "MST: Weight={}, Edges={}",
            outcome.total_weight,
            outcome.edges.len()
        )
    } else {
        "MST: Graph not connected or calculation failed".to_string()
    };
}

fn run_max_flow(job: &mut Job) {
    job.results.max_flow = match max_flow_default(&job.graph) {
        Ok(flow) => format!(
            "MaxFlow: Value={} (source={}, sink={})",
            flow.value, flow.source, flow.sink
        ),
        Err(_) => "MaxFlow: Calculation failed".to_string(),
    };
}

fn run_max_clique(job: &mut Job) {
    let outcome = MaximumClique::run(&job.graph, MaxCliqueConfig::default());
    job.results.max_clique = format!("MaxClique: Size={}", outcome.size);
}

fn run_clique_count(job: &mut Job) {
    let outcome = CliqueCount::run(&job.graph, CliqueCountConfig::default());
    job.results.clique_count = format!("CliqueCount: Total={}", outcome.total);
}
