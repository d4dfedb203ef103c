//! Typed handles returned by the registry.
//!
//! Family handles (`CounterHandle`, `GaugeHandle`) resolve label values on
//! every call. Bound handles (`Counter`, `Gauge`) hold one series cell and
//! update it without any map lookup.

use std::sync::Arc;

use crate::error::RegistryError;
use crate::registry::family::MetricFamily;
use crate::registry::series::AtomicF64;

/// Handle to a counter family.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    family: Arc<MetricFamily>,
}

impl CounterHandle {
    pub(crate) fn new(family: Arc<MetricFamily>) -> Self {
        Self { family }
    }

    pub fn name(&self) -> &str {
        self.family.descriptor().name()
    }

    /// Add `delta` to the series for `label_values`.
    ///
    /// Rejects negative or non-finite deltas before touching any series.
    pub fn increment(&self, label_values: &[&str], delta: f64) -> Result<(), RegistryError> {
        self.family.descriptor().check_arity(label_values.len())?;
        check_delta(self.name(), delta)?;
        self.family.series(label_values)?.add(delta);
        Ok(())
    }

    /// Add one.
    pub fn inc(&self, label_values: &[&str]) -> Result<(), RegistryError> {
        self.increment(label_values, 1.0)
    }

    /// Current value, `None` if the series was never written.
    pub fn get(&self, label_values: &[&str]) -> Result<Option<f64>, RegistryError> {
        self.family.value(label_values)
    }

    /// Bind to one series, creating it if needed.
    pub fn with_label_values(&self, label_values: &[&str]) -> Result<Counter, RegistryError> {
        Ok(Counter {
            name: self.family.descriptor().name().into(),
            cell: self.family.series(label_values)?,
        })
    }

    /// Number of series realized for this family.
    pub fn series_count(&self) -> usize {
        self.family.series_count()
    }
}

/// A counter bound to one label set.
#[derive(Debug, Clone)]
pub struct Counter {
    name: Arc<str>,
    cell: Arc<AtomicF64>,
}

impl Counter {
    pub fn increment(&self, delta: f64) -> Result<(), RegistryError> {
        check_delta(&self.name, delta)?;
        self.cell.add(delta);
        Ok(())
    }

    pub fn inc(&self) {
        self.cell.add(1.0);
    }

    pub fn get(&self) -> f64 {
        self.cell.get()
    }
}

/// Handle to a gauge family.
#[derive(Debug, Clone)]
pub struct GaugeHandle {
    family: Arc<MetricFamily>,
}

impl GaugeHandle {
    pub(crate) fn new(family: Arc<MetricFamily>) -> Self {
        Self { family }
    }

    pub fn name(&self) -> &str {
        self.family.descriptor().name()
    }

    /// Replace the value of the series for `label_values`.
    pub fn set(&self, label_values: &[&str], value: f64) -> Result<(), RegistryError> {
        self.family.series(label_values)?.set(value);
        Ok(())
    }

    /// Add `delta`, which may be negative.
    pub fn add(&self, label_values: &[&str], delta: f64) -> Result<(), RegistryError> {
        self.family.series(label_values)?.add(delta);
        Ok(())
    }

    pub fn inc(&self, label_values: &[&str]) -> Result<(), RegistryError> {
        self.add(label_values, 1.0)
    }

    pub fn dec(&self, label_values: &[&str]) -> Result<(), RegistryError> {
        self.add(label_values, -1.0)
    }

    /// Current value, `None` if the series was never written.
    pub fn get(&self, label_values: &[&str]) -> Result<Option<f64>, RegistryError> {
        self.family.value(label_values)
    }

    /// Bind to one series, creating it if needed.
    pub fn with_label_values(&self, label_values: &[&str]) -> Result<Gauge, RegistryError> {
        Ok(Gauge {
            cell: self.family.series(label_values)?,
        })
    }

    /// Number of series realized for this family.
    pub fn series_count(&self) -> usize {
        self.family.series_count()
    }
}

/// A gauge bound to one label set.
#[derive(Debug, Clone)]
pub struct Gauge {
    cell: Arc<AtomicF64>,
}

impl Gauge {
    pub fn set(&self, value: f64) {
        self.cell.set(value);
    }

    pub fn add(&self, delta: f64) {
        self.cell.add(delta);
    }

    pub fn inc(&self) {
        self.cell.add(1.0);
    }

    pub fn dec(&self) {
        self.cell.add(-1.0);
    }

    pub fn get(&self) -> f64 {
        self.cell.get()
    }
}

fn check_delta(name: &str, delta: f64) -> Result<(), RegistryError> {
    if !delta.is_finite() || delta < 0.0 {
        return Err(RegistryError::InvalidDelta {
            name: name.to_string(),
            delta,
        });
    }
    Ok(())
}
