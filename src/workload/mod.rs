//! Workload generation.
//!
//! Stands in for a real application: a writer task that updates registry
//! handles on a timer. The registry does not depend on it.

pub mod simulator;

pub use simulator::Simulator;
