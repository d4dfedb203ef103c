//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Build the registry and define every process metric
//! - Bind the listener (last, so traffic only arrives when ready)
//! - Run the workload and HTTP server until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A conflicting metric definition aborts startup, it is a programming error

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::validation::validate_config;
use crate::config::ExporterConfig;
use crate::error::StartupError;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::shutdown::{self, Shutdown};
use crate::net;
use crate::observability::ExporterMetrics;
use crate::registry::MetricRegistry;
use crate::workload::Simulator;

/// A fully initialized exporter, bound but not yet serving.
pub struct Exporter {
    config: ExporterConfig,
    registry: Arc<MetricRegistry>,
    listener: TcpListener,
    server: HttpServer,
    simulator: Option<Simulator>,
}

impl Exporter {
    /// Validate, define metrics and bind.
    pub async fn start(config: ExporterConfig) -> Result<Self, StartupError> {
        validate_config(&config).map_err(StartupError::Config)?;

        let registry = Arc::new(MetricRegistry::new());
        let metrics = ExporterMetrics::register(&registry)?;

        let simulator = if config.workload.enabled {
            Some(
                Simulator::register(&registry, config.workload.clone())?
                    .with_metrics(metrics.clone()),
            )
        } else {
            tracing::info!("Workload simulator disabled");
            None
        };

        tracing::info!(
            families = registry.family_count(),
            "Metrics defined"
        );

        let server = HttpServer::with_state(
            AppState {
                registry: registry.clone(),
                metrics: Some(metrics),
            },
            &config.listener.metrics_path,
        );

        let listener = net::bind(config.listener.socket_addr()).await?;

        Ok(Self {
            config,
            registry,
            listener,
            server,
            simulator,
        })
    }

    /// Address the exposition endpoint is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The registry being served.
    pub fn registry(&self) -> Arc<MetricRegistry> {
        self.registry.clone()
    }

    /// Serve until `shutdown` is triggered, then stop the workload.
    ///
    /// In-flight connections and the workload each get the configured
    /// shutdown timeout to finish before they are abandoned.
    pub async fn serve(self, shutdown: Shutdown) -> Result<(), StartupError> {
        let workload = self
            .simulator
            .map(|sim| tokio::spawn(sim.run(shutdown.subscribe())));

        tracing::info!(
            path = %self.config.listener.metrics_path,
            "Serving metrics"
        );
        let deadline = self.config.shutdown.timeout();
        let server = self.server.run(self.listener, shutdown.subscribe());
        tokio::pin!(server);

        // Connections get `deadline` to drain once the signal fires.
        let drain_expired = {
            let rx = shutdown.subscribe();
            async move {
                shutdown::wait(rx).await;
                tokio::time::sleep(deadline).await;
            }
        };

        let served = tokio::select! {
            result = &mut server => result,
            _ = drain_expired => {
                tracing::warn!(
                    timeout_secs = self.config.shutdown.timeout_secs,
                    "Connections did not drain before the deadline"
                );
                Ok(())
            }
        };

        // The server may also stop on its own error; make sure the workload follows.
        shutdown.trigger();

        if let Some(task) = workload {
            match tokio::time::timeout(deadline, task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!(error = %e, "Workload task failed"),
                Err(_) => tracing::warn!(
                    timeout_secs = self.config.shutdown.timeout_secs,
                    "Workload did not stop before the deadline"
                ),
            }
        }

        served.map_err(StartupError::Serve)
    }
}

/// Start and serve in one call.
pub async fn run(config: ExporterConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    Exporter::start(config).await?.serve(shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    fn local_config() -> ExporterConfig {
        let mut config = ExporterConfig::default();
        config.listener.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.listener.port = 0;
        config.workload.interval_ms = 10;
        config
    }

    #[tokio::test]
    async fn test_start_defines_process_metrics() {
        let exporter = Exporter::start(local_config()).await.unwrap();
        let registry = exporter.registry();

        assert!(registry.descriptor("active_users").is_some());
        assert!(registry.descriptor("requests_total").is_some());
        assert!(registry.descriptor("exporter_scrapes_total").is_some());
        assert_ne!(exporter.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_bind() {
        let mut config = local_config();
        config.workload.interval_ms = 0;

        let err = Exporter::start(config).await.err().unwrap();
        assert!(matches!(err, StartupError::Config(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_serve_returns_after_shutdown() {
        let exporter = Exporter::start(local_config()).await.unwrap();
        let shutdown = Shutdown::new();
        let task = tokio::spawn(exporter.serve(shutdown.clone()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_trigger_during_startup_is_not_lost() {
        let shutdown = Shutdown::new();
        let exporter = Exporter::start(local_config()).await.unwrap();
        // Signal lands after start but before anything subscribes.
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(2), exporter.serve(shutdown))
            .await
            .expect("serve kept running after shutdown was triggered");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_exits_cleanly_on_earlier_signal() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(2), run(local_config(), shutdown))
            .await
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_stalled_client_does_not_block_exit() {
        use tokio::io::AsyncWriteExt;

        let mut config = local_config();
        config.shutdown.timeout_secs = 1;
        let exporter = Exporter::start(config).await.unwrap();
        let addr = exporter.local_addr().unwrap();
        let shutdown = Shutdown::new();
        let task = tokio::spawn(exporter.serve(shutdown.clone()));

        // Headers never finish.
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /metrics HTTP/1.1\r\nHost: localhost\r\n")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(4), task)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
        drop(stream);
    }
}
