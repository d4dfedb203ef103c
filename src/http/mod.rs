//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! GET /metrics
//!     → server.rs (axum router, trace layer)
//!     → MetricRegistry::render
//!     → 200 text/plain; version=0.0.4
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
