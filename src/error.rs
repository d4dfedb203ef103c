//! Error taxonomy for the registry and process startup.
//!
//! # Design Decisions
//! - Registry errors are local to one call and never poison other series
//! - Startup errors are fatal and map to a process exit code

use std::net::SocketAddr;

use crate::config::validation::ValidationError;
use crate::registry::MetricKind;

/// Errors returned by registry definitions and updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// The name is already registered with a different kind or label signature.
    #[error(
        "metric `{name}` already registered as {existing_kind} {existing_labels:?}, \
         cannot redefine as {requested_kind} {requested_labels:?}"
    )]
    DuplicateName {
        name: String,
        existing_kind: MetricKind,
        existing_labels: Vec<String>,
        requested_kind: MetricKind,
        requested_labels: Vec<String>,
    },

    /// Wrong number of label values for the metric's declared dimensions.
    #[error("metric `{name}` expects {expected} label values, got {actual}")]
    LabelArity {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Counter increments must be finite and non-negative.
    #[error("counter `{name}` cannot be incremented by {delta}")]
    InvalidDelta { name: String, delta: f64 },

    /// Metric or label name does not follow the exposition grammar.
    #[error("invalid {what} name `{name}`")]
    InvalidName { what: &'static str, name: String },

    /// A labeled mapping named a dimension the metric does not declare.
    #[error("metric `{name}` has no label dimension `{label}`")]
    UnknownLabel { name: String, label: String },
}

/// Fatal errors raised while bringing the process up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid configuration: {}", join_errors(.0))]
    Config(Vec<ValidationError>),

    #[error("failed to define process metrics: {0}")]
    Registry(#[from] RegistryError),

    #[error("failed to bind exposition listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("exposition server failed: {0}")]
    Serve(#[source] std::io::Error),
}

impl StartupError {
    /// Process exit code for this error. Bind failures get their own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Bind { .. } => 2,
            _ => 1,
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
