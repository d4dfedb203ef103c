//! Observability of the exporter itself.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events to stdout)
//!     → self_metrics.rs (exporter_* families on the served registry)
//! ```

pub mod logging;
pub mod self_metrics;

pub use self_metrics::ExporterMetrics;
