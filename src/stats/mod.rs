//! Observability for the mixing node

pub mod metrics;

pub use metrics::{MetricsSnapshot, MixerMetrics};
