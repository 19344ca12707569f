//! Per-point metric storage.

pub mod metric_field;

pub use metric_field::{MetricField, MetricMode, MetricValue};
