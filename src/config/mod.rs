//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line flags / SIM_EXPORTER_* environment
//!     → args.rs (clap parse)
//!     → schema.rs (ExporterConfig with defaults)
//!     → validation.rs (semantic checks)
//!     → lifecycle::startup
//! ```
//!
//! # Design Decisions
//! - No config file; flags and environment only
//! - All fields have defaults
//! - Validation separates syntactic (clap) from semantic checks

pub mod args;
pub mod schema;
pub mod validation;

pub use args::Args;
pub use schema::{ExporterConfig, ListenerConfig, ShutdownConfig, WorkloadConfig};
