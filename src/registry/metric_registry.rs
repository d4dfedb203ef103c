//! The process metric registry.
//!
//! # Responsibilities
//! - Define counter and gauge families, idempotently for matching signatures
//! - Reject conflicting redefinitions without touching the original
//! - Render every family on demand
//!
//! The registry is an ordinary value. Construct one, wrap it in an `Arc` and
//! hand it to whatever updates metrics and to the exposition server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::RegistryError;
use crate::exposition;
use crate::registry::descriptor::{MetricDescriptor, MetricKind};
use crate::registry::family::{FamilySnapshot, MetricFamily};
use crate::registry::handle::{CounterHandle, GaugeHandle};

/// Owner of every metric family in the process.
#[derive(Debug, Default)]
pub struct MetricRegistry {
    families: DashMap<String, Arc<MetricFamily>>,
    next_ordinal: AtomicU64,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or look up) a counter family.
    pub fn define_counter(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<CounterHandle, RegistryError> {
        self.define(name, help, MetricKind::Counter, label_names)
            .map(CounterHandle::new)
    }

    /// Define (or look up) a gauge family.
    pub fn define_gauge(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<GaugeHandle, RegistryError> {
        self.define(name, help, MetricKind::Gauge, label_names)
            .map(GaugeHandle::new)
    }

    fn define(
        &self,
        name: &str,
        help: &str,
        kind: MetricKind,
        label_names: &[&str],
    ) -> Result<Arc<MetricFamily>, RegistryError> {
        let descriptor = MetricDescriptor::new(name, help, kind, label_names)?;

        match self.families.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                let existing = entry.get().descriptor();
                if existing.same_signature(kind, label_names) {
                    return Ok(entry.get().clone());
                }
                Err(RegistryError::DuplicateName {
                    name: name.to_string(),
                    existing_kind: existing.kind(),
                    existing_labels: existing.label_names().to_vec(),
                    requested_kind: kind,
                    requested_labels: label_names.iter().map(|l| l.to_string()).collect(),
                })
            }
            Entry::Vacant(entry) => {
                let ordinal = self.next_ordinal.fetch_add(1, Ordering::Relaxed);
                let family = Arc::new(MetricFamily::new(descriptor, ordinal));
                entry.insert(family.clone());

                tracing::debug!(
                    metric = %name,
                    kind = %kind,
                    labels = ?label_names,
                    "Metric defined"
                );
                Ok(family)
            }
        }
    }

    /// Number of defined families.
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Descriptor of a defined family.
    pub fn descriptor(&self, name: &str) -> Option<MetricDescriptor> {
        self.families
            .get(name)
            .map(|family| family.descriptor().clone())
    }

    /// Snapshot every family in registration order.
    ///
    /// Each series value is read atomically; different series may be read at
    /// slightly different moments.
    pub fn snapshot(&self) -> Vec<FamilySnapshot> {
        let mut families: Vec<Arc<MetricFamily>> = self
            .families
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        families.sort_by_key(|family| family.ordinal());

        families.iter().map(|family| family.snapshot()).collect()
    }

    /// Render the whole registry in the text exposition format.
    pub fn render(&self) -> String {
        exposition::encode(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_define_is_idempotent_for_same_signature() {
        let registry = MetricRegistry::new();
        let a = registry
            .define_counter("requests_total", "Total requests", &["app"])
            .unwrap();
        let b = registry
            .define_counter("requests_total", "Other help", &["app"])
            .unwrap();

        a.inc(&["web"]).unwrap();
        b.inc(&["web"]).unwrap();

        assert_eq!(registry.family_count(), 1);
        assert_eq!(a.get(&["web"]).unwrap(), Some(2.0));
        assert_eq!(
            registry.descriptor("requests_total").unwrap().help(),
            "Total requests"
        );
    }

    #[test]
    fn test_redefine_with_other_labels_fails() {
        let registry = MetricRegistry::new();
        registry
            .define_gauge("temperature", "Temp", &["room"])
            .unwrap();

        let err = registry
            .define_gauge("temperature", "Temp", &["room", "floor"])
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { ref name, .. } if name == "temperature"));

        let original = registry.descriptor("temperature").unwrap();
        assert_eq!(original.label_names(), ["room".to_string()]);
        assert_eq!(original.kind(), MetricKind::Gauge);
    }

    #[test]
    fn test_redefine_with_other_kind_fails() {
        let registry = MetricRegistry::new();
        registry.define_gauge("jobs", "Jobs", &[]).unwrap();

        let err = registry.define_counter("jobs", "Jobs", &[]).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateName {
                existing_kind: MetricKind::Gauge,
                requested_kind: MetricKind::Counter,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_name_registers_nothing() {
        let registry = MetricRegistry::new();
        assert!(registry.define_counter("bad-name", "h", &[]).is_err());
        assert!(registry.define_counter("ok", "h", &["__reserved"]).is_err());
        assert_eq!(registry.family_count(), 0);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let registry = Arc::new(MetricRegistry::new());
        let counter = registry
            .define_counter("hits_total", "Hits", &["app"])
            .unwrap();

        let threads = 8;
        let per_thread = 5_000;
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let counter = counter.clone();
                thread::spawn(move || {
                    for i in 0..per_thread {
                        counter.increment(&["web"], ((t + i) % 3) as f64).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let expected: f64 = (0..threads)
            .flat_map(|t| (0..per_thread).map(move |i| ((t + i) % 3) as f64))
            .sum();
        assert_eq!(counter.get(&["web"]).unwrap(), Some(expected));
    }

    #[test]
    fn test_concurrent_define_returns_single_family() {
        let registry = Arc::new(MetricRegistry::new());
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let registry = registry.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    registry
                        .define_counter("racy_total", "Racy", &[])
                        .unwrap()
                        .inc(&[])
                        .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(registry.family_count(), 1);
        let snap = registry.snapshot();
        assert_eq!(snap[0].samples[0].value, threads as f64);
    }

    #[test]
    fn test_render_during_concurrent_writes() {
        let registry = Arc::new(MetricRegistry::new());
        let gauge = registry.define_gauge("level", "Level", &["shard"]).unwrap();

        let writer = {
            let gauge = gauge.clone();
            thread::spawn(move || {
                for i in 0..2_000 {
                    let shard = (i % 10).to_string();
                    gauge.set(&[shard.as_str()], i as f64).unwrap();
                }
            })
        };

        for _ in 0..50 {
            let text = registry.render();
            let data_lines = text.lines().filter(|l| !l.starts_with('#')).count();
            assert!(data_lines <= 10);
        }
        writer.join().unwrap();

        assert_eq!(gauge.series_count(), 10);
    }

    #[test]
    fn test_snapshot_keeps_registration_order() {
        let registry = MetricRegistry::new();
        registry.define_gauge("zeta", "z", &[]).unwrap();
        registry.define_counter("alpha_total", "a", &[]).unwrap();
        registry.define_gauge("mid", "m", &[]).unwrap();

        let names: Vec<_> = registry
            .snapshot()
            .iter()
            .map(|f| f.descriptor.name().to_string())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha_total", "mid"]);
    }
}
