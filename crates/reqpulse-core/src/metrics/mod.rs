//! Concurrency-safe metric aggregates with dynamic labels.
//!
//! Counters and histograms are keyed by label tuples flattened into sorted
//! key vectors for deterministic ordering, backed by `DashMap` so concurrent
//! request tasks mutate them without external locking. Series cells are
//! created lazily on first observation and never removed; label cardinality
//! is caller-controlled and intentionally unbounded.

pub mod counter;
pub mod gauge;
pub mod histogram;
pub mod labels;
pub mod registry;

pub use counter::CounterVec;
pub use gauge::Gauge;
pub use histogram::{HistogramVec, DEFAULT_BUCKETS};
pub use labels::LabelSet;
pub use registry::{
    BucketSnapshot, MetricKind, MetricSnapshot, Registry, RegistrySnapshot, SeriesSnapshot,
    SeriesValue,
};
