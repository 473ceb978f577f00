//! Course Gateway
//!
//! HTTP gateway between the browser client and the planner / RAG gRPC services.
//!
//! # Architecture Overview
//!
//! ```text
//!  Browser                         COURSE GATEWAY                          Downstream
//!  ───────        ┌───────────────────────────────────────────────┐
//!  request  ────▶ │ CORS / preflight → method check → decode JSON │
//!                 │            │                                  │
//!                 │            ▼                                  │
//!                 │ preference store → request mapper → caller ───┼──▶ planner (gRPC)
//!                 │                                     (deadline)│──▶ RAG     (gRPC)
//!                 │                                        │      │
//!                 │                                        ▼      │
//!  response ◀──── │ reply (status + JSON) ◀── response mapper     │
//!                 └───────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use course_gateway::config::load_config;
use course_gateway::http::HttpServer;
use course_gateway::lifecycle::{connect_downstreams, signals, Shutdown};
use course_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "course-gateway")]
#[command(about = "HTTP gateway for the course planner and RAG services", long_about = None)]
struct Cli {
    /// Optional TOML config file. Environment variables override it.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!("course-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        planner = %config.downstream.planner_address,
        rag = %config.downstream.rag_address,
        solve_secs = config.timeouts.solve_secs,
        rag_query_secs = config.timeouts.rag_query_secs,
        rag_course_secs = config.timeouts.rag_course_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let downstreams = match connect_downstreams(&config).await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, downstreams);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
