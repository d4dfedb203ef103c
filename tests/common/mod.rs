//! Shared utilities for integration tests.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use sim_exporter::{Exporter, ExporterConfig, MetricRegistry, Shutdown};
use tokio::task::JoinHandle;

/// A running exporter on an ephemeral localhost port.
pub struct RunningExporter {
    pub addr: SocketAddr,
    pub registry: Arc<MetricRegistry>,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), sim_exporter::StartupError>>,
}

impl RunningExporter {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start an exporter with `tweak` applied to a localhost config.
pub async fn start_exporter(tweak: impl FnOnce(&mut ExporterConfig)) -> RunningExporter {
    let mut config = ExporterConfig::default();
    config.listener.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
    config.listener.port = 0;
    tweak(&mut config);

    let exporter = Exporter::start(config).await.unwrap();
    let addr = exporter.local_addr().unwrap();
    let registry = exporter.registry();
    let shutdown = Shutdown::new();
    let task = tokio::spawn(exporter.serve(shutdown.clone()));

    RunningExporter {
        addr,
        registry,
        shutdown,
        task,
    }
}

/// A client that never reuses connections between requests.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
