//! End-to-end scrapes against a real listener.

use std::time::Duration;

use sim_exporter::error::StartupError;
use sim_exporter::Exporter;

mod common;

#[tokio::test]
async fn test_scrape_serves_exposition_text() {
    let exporter = common::start_exporter(|c| c.workload.enabled = false).await;

    let gauge = exporter
        .registry
        .define_gauge("queue_depth", "Jobs waiting", &["queue"])
        .unwrap();
    gauge.set(&["default"], 12.0).unwrap();

    let res = common::client()
        .get(exporter.url("/metrics"))
        .send()
        .await
        .expect("Exporter unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "text/plain; version=0.0.4"
    );

    let body = res.text().await.unwrap();
    assert!(body.contains("# HELP queue_depth Jobs waiting\n# TYPE queue_depth gauge\n"));
    assert!(body.contains("queue_depth{queue=\"default\"} 12\n"));
    assert!(!body.contains("active_users"));

    exporter.shutdown.trigger();
    exporter.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let exporter = common::start_exporter(|c| c.workload.enabled = false).await;

    let res = common::client()
        .get(exporter.url("/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    exporter.shutdown.trigger();
    exporter.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_workload_updates_are_visible() {
    let exporter = common::start_exporter(|c| c.workload.interval_ms = 10).await;
    let client = common::client();

    tokio::time::sleep(Duration::from_millis(100)).await;

    let body = client
        .get(exporter.url("/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let requests: f64 = body
        .lines()
        .find_map(|l| l.strip_prefix("requests_total "))
        .expect("requests_total line")
        .parse()
        .unwrap();
    assert!(requests >= 1.0);

    let users: f64 = body
        .lines()
        .find_map(|l| l.strip_prefix("active_users "))
        .expect("active_users line")
        .parse()
        .unwrap();
    assert!((10.0..=100.0).contains(&users));

    // The scrape counter is read before it is incremented for this scrape.
    let second = client
        .get(exporter.url("/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(second.contains("exporter_scrapes_total 1\n"));

    exporter.shutdown.trigger();
    exporter.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_port_in_use_is_bind_error() {
    let exporter = common::start_exporter(|c| c.workload.enabled = false).await;
    let taken = exporter.addr;

    let mut config = sim_exporter::ExporterConfig::default();
    config.listener.host = taken.ip();
    config.listener.port = taken.port();

    let err = Exporter::start(config).await.err().unwrap();
    assert!(matches!(err, StartupError::Bind { .. }));
    assert_eq!(err.exit_code(), 2);

    exporter.shutdown.trigger();
    exporter.task.await.unwrap().unwrap();
}
