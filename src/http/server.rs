//! Exposition HTTP server.
//!
//! # Responsibilities
//! - Route `GET <metrics_path>` to `MetricRegistry::render`
//! - Answer every other path with 404
//! - Trace requests and count scrapes
//! - Stop accepting on the shutdown signal

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::exposition::CONTENT_TYPE;
use crate::lifecycle::shutdown;
use crate::observability::ExporterMetrics;
use crate::registry::MetricRegistry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MetricRegistry>,
    pub metrics: Option<ExporterMetrics>,
}

/// HTTP server for the exposition endpoint.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Serve `registry` at `metrics_path`.
    pub fn new(registry: Arc<MetricRegistry>, metrics_path: &str) -> Self {
        Self::with_state(
            AppState {
                registry,
                metrics: None,
            },
            metrics_path,
        )
    }

    /// Serve with explicit state, e.g. to count scrapes.
    pub fn with_state(state: AppState, metrics_path: &str) -> Self {
        Self {
            router: build_router(state, metrics_path),
        }
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn build_router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route(metrics_path, get(metrics_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let body = state.registry.render();
    if let Some(metrics) = &state.metrics {
        metrics.record_scrape();
    }

    tracing::debug!(bytes = body.len(), "Scrape served");

    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}
