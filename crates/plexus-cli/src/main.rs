// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use plexus_common::config::{PipelineConfig, PoolConfig};
use plexus_server::{dispatch, pipeline, pool, shutdown};
use tokio::net::TcpListener;
use tracing::info;

mod client;

#[derive(Parser)]
#[command(name = "plexus")]
#[command(about = "Concurrent graph-analysis server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the 4-stage pipeline server (MST, MaxFlow, MaxClique, CliqueCount)
    Pipeline {
        /// Port to listen on
        port: u16,
    },
    /// Run the per-connection request/reply server
    Dispatch {
        /// Port to listen on
        port: u16,
    },
    /// Run the leader-follower worker-pool server
    Pool {
        /// Port to listen on
        port: u16,
        /// Number of pool workers
        #[arg(long, default_value_t = 4)]
        workers: usize,
    },
    /// Submit a job to a pipeline server and print the report
    Submit {
        /// Server address
        #[arg(long, default_value = "127.0.0.1:3490")]
        addr: String,
        /// Number of vertices
        #[arg(short = 'n', long)]
        vertices: usize,
        /// Number of random edges to generate
        #[arg(short, long, default_value_t = 0)]
        edges: usize,
        /// Maximum random edge weight
        #[arg(short = 'w', long, default_value_t = 10)]
        max_weight: u32,
        /// RNG seed
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
    },
    /// Send one algorithm request to a dispatch or pool server
    Request {
        /// Server address
        #[arg(long, default_value = "127.0.0.1:3490")]
        addr: String,
        /// Algorithm name: euler, maxflow, mst, maxclique, cliquecount
        algorithm: String,
        /// Number of vertices
        #[arg(short = 'n', long)]
        vertices: usize,
        /// Number of random edges to generate
        #[arg(short, long, default_value_t = 0)]
        edges: usize,
        /// Maximum random edge weight
        #[arg(short = 'w', long, default_value_t = 10)]
        max_weight: u32,
        /// RNG seed
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Pipeline { port } => {
            let listener = bind(port).await?;
            let shutdown = shutdown_on_ctrl_c();
            let summary = pipeline::serve(listener, PipelineConfig::default(), shutdown).await?;
            println!(
                "Pipeline server stopped. Jobs admitted: {}, completed: {}",
                summary.jobs_admitted, summary.jobs_completed
            );
        }
        Commands::Dispatch { port } => {
            let listener = bind(port).await?;
            let shutdown = shutdown_on_ctrl_c();
            let summary = dispatch::serve(listener, shutdown).await?;
            println!(
                "Dispatch server stopped. Total requests: {}",
                summary.requests
            );
        }
        Commands::Pool { port, workers } => {
            ensure!(workers >= 1, "pool needs at least one worker");
            let listener = bind(port).await?;
            let shutdown = shutdown_on_ctrl_c();
            let config = PoolConfig { workers };
            let summary = pool::serve(listener, config, shutdown).await?;
            println!(
                "Leader-follower server stopped. Total requests: {}",
                summary.requests
            );
        }
        Commands::Submit {
            addr,
            vertices,
            edges,
            max_weight,
            seed,
        } => {
            let report = client::submit(&addr, vertices, edges, max_weight, seed).await?;
            println!("{report}");
        }
        Commands::Request {
            addr,
            algorithm,
            vertices,
            edges,
            max_weight,
            seed,
        } => {
            let reply = client::request(&addr, &algorithm, vertices, edges, max_weight, seed).await?;
            match reply {
                Some(text) => println!("{text}"),
                None => println!("Request failed (server returned status 0)"),
            }
        }
    }

    Ok(())
}

async fn bind(port: u16) -> Result<TcpListener> {
    ensure!(port != 0, "port must be in 1..=65535");
    TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))
}

/// Arms SIGINT handling: the returned handle trips when Ctrl-C arrives.
fn shutdown_on_ctrl_c() -> shutdown::Shutdown {
    let (controller, handle) = shutdown::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            controller.trigger();
        }
        // Keep the controller alive so a failed signal hook does not read
        // as a shutdown.
        std::future::pending::<()>().await;
    });
    handle
}
