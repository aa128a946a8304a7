//! Observer implementations.
//!
//! - [`TracingObserver`] - Structured `tracing` events and `metrics` counters

mod tracing_observer;

pub use tracing_observer::TracingObserver;
