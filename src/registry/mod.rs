//! In-memory metric registry.
//!
//! # Data Flow
//! ```text
//! define_counter / define_gauge
//!     → metric_registry.rs (name → family, signature checks)
//!     → family.rs (label set → series cell, lazy creation)
//!     → handle.rs (CounterHandle / GaugeHandle returned to writers)
//!
//! Writers:
//!     handle.increment / handle.set → series.rs (atomic f64 cell)
//!
//! Scrape:
//!     MetricRegistry::render → snapshot per family → exposition::encode
//! ```
//!
//! # Design Decisions
//! - No global registry; callers own an instance and share it by `Arc`
//! - Labels are a fixed, ordered schema declared at definition time
//! - Per-series atomicity only; a render is not a registry-wide snapshot
//! - Series are never evicted (high-cardinality labels grow memory)

pub mod descriptor;
pub mod family;
pub mod handle;
pub mod metric_registry;
pub mod series;

pub use descriptor::{MetricDescriptor, MetricKind};
pub use family::{FamilySnapshot, Sample};
pub use handle::{Counter, CounterHandle, Gauge, GaugeHandle};
pub use metric_registry::MetricRegistry;
pub use series::LabelSet;
