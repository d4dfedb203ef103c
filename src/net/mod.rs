//! Network layer.
//!
//! # Data Flow
//! ```text
//! ListenerConfig::socket_addr()
//!     → listener.rs (bind, map failure to StartupError::Bind)
//!     → http::server (axum::serve)
//! ```

pub mod listener;

pub use listener::bind;
