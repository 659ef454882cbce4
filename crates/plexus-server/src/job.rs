// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! The unit of work carried through the pipeline.
//!
//! A job owns its graph and its client connection for its whole lifetime;
//! ownership moves from stage to stage through the queues, and the terminal
//! stage drops the job after writing the report, destroying the graph
//! exactly once.

use plexus_common::graph::Graph;
use std::time::Instant;
use tokio::net::TcpStream;

/// One stringified partial result per pipeline stage.
#[derive(Debug, Default)]
pub struct StageResults {
    pub mst: String,
    pub max_flow: String,
    pub max_clique: String,
    pub clique_count: String,
}

#[derive(Debug)]
pub struct Job {
    pub id: u64,
    pub graph: Graph,
    pub stream: TcpStream,
    pub started: Instant,
    pub results: StageResults,
}

impl Job {
    pub fn new(id: u64, graph: Graph, stream: TcpStream) -> Self {
        Self {
            id,
            graph,
            stream,
            started: Instant::now(),
            results: StageResults::default(),
        }
    }

    /// Renders the consolidated report sent back to the client.
    pub fn render_report(&self) -> String {
        format!(
            "=== PIPELINE PROCESSING RESULTS ===\n\
             Job ID: {}\n\
             Graph: {} vertices\n\
             Processing Time: {:.2} seconds\n\
             \n\
             === ALGORITHM RESULTS ===\n\
             {}\n{}\n{}\n{}\n\
             =====================================\n",
            self.id,
            self.graph.vertex_count(),
            self.started.elapsed().as_secs_f64(),
            self.results.mst,
            self.results.max_flow,
            self.results.max_clique,
            self.results.clique_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn loopback_stream() -> TcpStream {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stream, _accepted) =
            tokio::join!(TcpStream::connect(addr), listener.accept());
        stream.unwrap()
    }

    #[tokio::test]
    async fn test_report_layout() {
        let graph = Graph::new(3).unwrap();
        let mut job = Job::new(42, graph, loopback_stream().await);
        job.results.mst = "MST: Weight=2, Edges=2".into();
        job.results.max_flow = "MaxFlow: Value=2 (source=0, sink=2)".into();
        job.results.max_clique = "MaxClique: Size=3".into();
        job.results.clique_count = "CliqueCount: Total=7".into();

        let report = job.render_report();
        assert!(report.starts_with("=== PIPELINE PROCESSING RESULTS ===\n"));
        assert!(report.contains("Job ID: 42\n"));
        assert!(report.contains("Graph: 3 vertices\n"));
        assert!(report.contains("Processing Time: 0."));
        assert!(report.contains(
            "=== ALGORITHM RESULTS ===\n\
             MST: Weight=2, Edges=2\n\
             MaxFlow: Value=2 (source=0, sink=2)\n\
             MaxClique: Size=3\n\
             CliqueCount: Total=7\n"
        ));
        assert!(report.ends_with("=====================================\n"));
    }
}
