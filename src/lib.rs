//! Simulated measurement exporter.
//!
//! An in-memory metric registry with concurrent counter and gauge updates,
//! rendered in the Prometheus text exposition format on every scrape.

pub mod config;
pub mod error;
pub mod exposition;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod registry;
pub mod workload;

pub use config::ExporterConfig;
pub use error::{RegistryError, StartupError};
pub use http::HttpServer;
pub use lifecycle::{Exporter, Shutdown};
pub use registry::{CounterHandle, GaugeHandle, MetricKind, MetricRegistry};
