//! Simulated measurement generator.
//!
//! On every tick:
//! - `active_users` (gauge) is set to a random integer from the configured range
//! - `requests_total` (counter) grows by a random integer from the configured range

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::config::WorkloadConfig;
use crate::error::RegistryError;
use crate::lifecycle::shutdown;
use crate::observability::ExporterMetrics;
use crate::registry::{CounterHandle, GaugeHandle, MetricRegistry};

pub const ACTIVE_USERS: &str = "active_users";
pub const REQUESTS_TOTAL: &str = "requests_total";

/// Writer task feeding the registry with random values.
pub struct Simulator {
    config: WorkloadConfig,
    active_users: GaugeHandle,
    requests: CounterHandle,
    metrics: Option<ExporterMetrics>,
    rng: StdRng,
}

impl Simulator {
    /// Define the simulated families on `registry`.
    pub fn register(registry: &MetricRegistry, config: WorkloadConfig) -> Result<Self, RegistryError> {
        let active_users = registry.define_gauge(ACTIVE_USERS, "Number of active users", &[])?;
        let requests = registry.define_counter(REQUESTS_TOTAL, "Total number of requests", &[])?;

        Ok(Self {
            config,
            active_users,
            requests,
            metrics: None,
            rng: StdRng::from_entropy(),
        })
    }

    /// Report rejected updates through the exporter's own metrics.
    pub fn with_metrics(mut self, metrics: ExporterMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Use a fixed seed for reproducible sequences.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Apply one round of updates. Each update fails independently.
    pub fn tick(&mut self) {
        let users = self.rng.gen_range(self.config.active_users.clone()) as f64;
        if let Err(e) = self.active_users.set(&[], users) {
            self.report(ACTIVE_USERS, &e);
        }

        let delta = self.rng.gen_range(self.config.requests_per_tick.clone()) as f64;
        if let Err(e) = self.requests.increment(&[], delta) {
            self.report(REQUESTS_TOTAL, &e);
        }

        tracing::trace!(active_users = users, requests_delta = delta, "Workload tick");
    }

    /// Tick at the configured interval until shutdown.
    pub async fn run(mut self, shutdown_rx: watch::Receiver<bool>) {
        tracing::info!(interval_ms = self.config.interval_ms, "Workload simulator starting");

        let mut ticker = time::interval(self.config.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let stopped = shutdown::wait(shutdown_rx);
        tokio::pin!(stopped);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick(),
                _ = &mut stopped => {
                    tracing::info!("Workload simulator received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    fn report(&self, metric: &str, error: &RegistryError) {
        tracing::warn!(metric = %metric, error = %error, "Update rejected");
        if let Some(metrics) = &self.metrics {
            metrics.record_update_error(metric);
        }
    }
}
