//! Configuration schema definitions.
//!
//! There is no configuration file. Every value has a default and can be
//! overridden from the command line or environment (see `args.rs`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Root configuration for the exporter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExporterConfig {
    /// Exposition listener.
    pub listener: ListenerConfig,

    /// Simulated measurement generator.
    pub workload: WorkloadConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: IpAddr,

    /// Listen port for the exposition endpoint.
    pub port: u16,

    /// Path served with the exposition text.
    pub metrics_path: String,
}

impl ListenerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            metrics_path: "/metrics".to_string(),
        }
    }
}

/// Workload generator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadConfig {
    /// Run the generator at all.
    pub enabled: bool,

    /// Time between ticks in milliseconds.
    pub interval_ms: u64,

    /// Range `active_users` is drawn from on each tick.
    pub active_users: RangeInclusive<u64>,

    /// Range `requests_total` grows by on each tick.
    pub requests_per_tick: RangeInclusive<u64>,
}

impl WorkloadConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 1000,
            active_users: 10..=100,
            requests_per_tick: 1..=5,
        }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ShutdownConfig {
    /// Deadline for background tasks to stop after the signal, in seconds.
    pub timeout_secs: u64,
}

impl ShutdownConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}
