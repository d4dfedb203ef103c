//! One metric family: a descriptor plus its series.
//!
//! # Responsibilities
//! - Map label sets to series cells
//! - Create series lazily on first write, exactly once per label set
//! - Produce a per-series consistent snapshot for rendering
//!
//! # Design Decisions
//! - Series live in a sharded map; creating a new series locks one shard,
//!   updating an existing one only takes that shard's read lock
//! - Series are never evicted. Unbounded label values grow memory without
//!   bound; callers own their cardinality
//! - An unlabeled family has exactly one series, materialized at 0

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::RegistryError;
use crate::registry::descriptor::MetricDescriptor;
use crate::registry::series::{AtomicF64, LabelSet};

/// A registered metric family.
#[derive(Debug)]
pub struct MetricFamily {
    descriptor: Arc<MetricDescriptor>,
    /// Registration order, used to keep render output stable.
    ordinal: u64,
    series: DashMap<LabelSet, Arc<AtomicF64>>,
}

impl MetricFamily {
    pub fn new(descriptor: MetricDescriptor, ordinal: u64) -> Self {
        let series = DashMap::new();
        if descriptor.label_names().is_empty() {
            series.insert(LabelSet::empty(), Arc::new(AtomicF64::default()));
        }
        Self {
            descriptor: Arc::new(descriptor),
            ordinal,
            series,
        }
    }

    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.descriptor
    }

    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Number of series realized so far (the family's cardinality).
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Look up or create the series for `label_values`.
    ///
    /// Writers racing on the same new label set all receive the same cell.
    pub fn series(&self, label_values: &[&str]) -> Result<Arc<AtomicF64>, RegistryError> {
        self.descriptor.check_arity(label_values.len())?;
        let key = LabelSet::new(label_values);

        if let Some(cell) = self.series.get(&key) {
            return Ok(cell.value().clone());
        }

        let cell = self
            .series
            .entry(key)
            .or_insert_with(|| {
                tracing::trace!(
                    metric = %self.descriptor.name(),
                    labels = ?label_values,
                    "Series created"
                );
                Arc::new(AtomicF64::default())
            })
            .value()
            .clone();
        Ok(cell)
    }

    /// Current value of one series, `None` if it was never written.
    pub fn value(&self, label_values: &[&str]) -> Result<Option<f64>, RegistryError> {
        self.descriptor.check_arity(label_values.len())?;
        Ok(self
            .series
            .get(&LabelSet::new(label_values))
            .map(|cell| cell.get()))
    }

    /// Copy out every series, sorted by label values.
    pub fn snapshot(&self) -> FamilySnapshot {
        let mut samples: Vec<Sample> = self
            .series
            .iter()
            .map(|entry| Sample {
                labels: entry.key().clone(),
                value: entry.value().get(),
            })
            .collect();
        samples.sort_by(|a, b| a.labels.cmp(&b.labels));

        FamilySnapshot {
            descriptor: self.descriptor.clone(),
            samples,
        }
    }
}

/// A point-in-time copy of one family, handed to the renderer.
#[derive(Debug, Clone)]
pub struct FamilySnapshot {
    pub descriptor: Arc<MetricDescriptor>,
    pub samples: Vec<Sample>,
}

/// One series value inside a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub labels: LabelSet,
    pub value: f64,
}
