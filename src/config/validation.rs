//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: ExporterConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::ExporterConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("metrics path `{0}` must start with `/`")]
    MetricsPath(String),

    #[error("workload interval must be greater than zero")]
    ZeroInterval,

    #[error("{name} range {min}..={max} is empty")]
    EmptyRange {
        name: &'static str,
        min: u64,
        max: u64,
    },
}

/// Check every rule and collect all violations.
pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.listener.metrics_path.starts_with('/') {
        errors.push(ValidationError::MetricsPath(
            config.listener.metrics_path.clone(),
        ));
    }

    let workload = &config.workload;
    if workload.enabled {
        if workload.interval_ms == 0 {
            errors.push(ValidationError::ZeroInterval);
        }
        for (name, range) in [
            ("active_users", &workload.active_users),
            ("requests_per_tick", &workload.requests_per_tick),
        ] {
            if range.is_empty() {
                errors.push(ValidationError::EmptyRange {
                    name,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
