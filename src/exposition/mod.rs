//! Exposition of registry snapshots.
//!
//! # Data Flow
//! ```text
//! MetricRegistry::snapshot()
//!     → text.rs (HELP / TYPE / sample lines)
//!     → String body served by http::server
//! ```
//!
//! # Design Decisions
//! - Pure transform, no state of its own
//! - Output order follows the snapshot (registration order, then labels)

pub mod text;

pub use text::{encode, CONTENT_TYPE};
