//! Command line and environment overrides.

use std::net::IpAddr;

use clap::Parser;

use crate::config::schema::{ExporterConfig, ListenerConfig, ShutdownConfig, WorkloadConfig};

/// Serve simulated measurements for a Prometheus scraper.
#[derive(Parser, Debug, Clone)]
#[command(name = "sim-exporter")]
#[command(version)]
pub struct Args {
    /// Listen port for the exposition endpoint.
    #[arg(short, long, env = "SIM_EXPORTER_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Interface to bind.
    #[arg(long, env = "SIM_EXPORTER_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Path the exposition endpoint is served on.
    #[arg(long, env = "SIM_EXPORTER_METRICS_PATH", default_value = "/metrics")]
    pub metrics_path: String,

    /// Milliseconds between simulated updates.
    #[arg(long, env = "SIM_EXPORTER_INTERVAL_MS", default_value_t = 1000)]
    pub interval_ms: u64,

    /// Serve the endpoint without generating simulated data.
    #[arg(long)]
    pub no_workload: bool,

    /// Seconds open connections and the workload get to finish after a
    /// shutdown signal.
    #[arg(long, env = "SIM_EXPORTER_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

impl Args {
    /// Fold the overrides into the default configuration.
    pub fn into_config(self) -> ExporterConfig {
        ExporterConfig {
            listener: ListenerConfig {
                host: self.host,
                port: self.port,
                metrics_path: self.metrics_path,
            },
            workload: WorkloadConfig {
                enabled: !self.no_workload,
                interval_ms: self.interval_ms,
                ..WorkloadConfig::default()
            },
            shutdown: ShutdownConfig {
                timeout_secs: self.shutdown_timeout_secs,
            },
        }
    }
}
