//! Metrics about the exporter, published on the registry it serves.
//!
//! # Metrics
//! - `exporter_scrapes_total` (counter): exposition requests served
//! - `exporter_update_errors_total` (counter): rejected workload updates, by metric

use crate::error::RegistryError;
use crate::registry::{Counter, CounterHandle, MetricRegistry};

/// Handles for the exporter's own families.
#[derive(Debug, Clone)]
pub struct ExporterMetrics {
    scrapes: Counter,
    update_errors: CounterHandle,
}

impl ExporterMetrics {
    /// Define the exporter families on `registry`.
    pub fn register(registry: &MetricRegistry) -> Result<Self, RegistryError> {
        let scrapes = registry
            .define_counter(
                "exporter_scrapes_total",
                "Total number of exposition requests served",
                &[],
            )?
            .with_label_values(&[])?;
        let update_errors = registry.define_counter(
            "exporter_update_errors_total",
            "Total number of rejected metric updates",
            &["metric"],
        )?;
        Ok(Self {
            scrapes,
            update_errors,
        })
    }

    pub fn record_scrape(&self) {
        self.scrapes.inc();
    }

    pub fn record_update_error(&self, metric: &str) {
        if let Err(e) = self.update_errors.inc(&[metric]) {
            tracing::warn!(error = %e, "Failed to record update error");
        }
    }
}
