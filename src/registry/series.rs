//! The mutable cell behind one time series.

use std::sync::atomic::{AtomicU64, Ordering};

/// Concrete label values for one series, positional against the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelSet(Box<[String]>);

impl LabelSet {
    pub fn new(values: &[&str]) -> Self {
        Self(values.iter().map(|v| v.to_string()).collect())
    }

    /// The empty label set of an unlabeled metric.
    pub fn empty() -> Self {
        Self(Box::default())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An `f64` stored as its bit pattern in an `AtomicU64`.
///
/// Loads and stores move all 64 bits at once, so a reader never observes a
/// half-written value.
#[derive(Debug, Default)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Atomically add `delta`, returning the new value.
    pub fn add(&self, delta: f64) -> f64 {
        let mut prev = self.bits.load(Ordering::Relaxed);
        loop {
            let next = f64::from_bits(prev) + delta;
            match self.bits.compare_exchange_weak(
                prev,
                next.to_bits(),
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(x) => prev = x,
            }
        }
    }
}
