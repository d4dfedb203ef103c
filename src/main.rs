//! Simulated Measurement Exporter
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                 SIM-EXPORTER                 │
//!                  │                                              │
//!                  │  ┌───────────┐   set / increment             │
//!                  │  │ workload  │──────────────┐                │
//!                  │  │ simulator │              ▼                │
//!                  │  └───────────┘      ┌────────────────┐       │
//!                  │                     │ MetricRegistry │       │
//!   GET /metrics   │  ┌─────────┐        │ family → series│       │
//!  ────────────────┼─▶│  http   │─render─▶└───────┬────────┘       │
//!                  │  │ server  │                 │ snapshot       │
//!  ◀───────────────┼──│         │◀─── exposition::encode           │
//!   text/plain     │  └─────────┘                                  │
//!                  │                                              │
//!                  │  config · lifecycle · observability          │
//!                  └──────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use sim_exporter::config::Args;
use sim_exporter::lifecycle::{signals, startup, Shutdown};
use sim_exporter::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sim-exporter starting");

    let config = args.into_config();
    tracing::info!(
        bind_address = %config.listener.socket_addr(),
        workload_enabled = config.workload.enabled,
        interval_ms = config.workload.interval_ms,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(signals::listen(shutdown.clone()));

    match startup::run(config, shutdown).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::from(e.exit_code())
        }
    }
}
