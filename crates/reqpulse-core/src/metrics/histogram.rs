//! Cumulative-bucket histogram with dynamic labels.

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::error::{ReqPulseError, Result};

use super::labels::LabelSet;

/// Default latency bounds in seconds, 5ms to 10s.
pub const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// One series worth of histogram state: cumulative per-bucket counts, running
/// sum, and total observation count. The total count doubles as the implicit
/// `+Inf` bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramCell {
    pub buckets: Vec<u64>,
    pub sum: f64,
    pub count: u64,
}

impl HistogramCell {
    fn new(n_buckets: usize) -> Self {
        Self {
            buckets: vec![0; n_buckets],
            sum: 0.0,
            count: 0,
        }
    }
}

/// Latency/size distribution accumulator keyed by label tuples.
///
/// Bounds are fixed at construction: strictly ascending, finite, with an
/// implicit trailing `+Inf` bucket. Each cell is guarded by one mutex so an
/// observation lands in (buckets, sum, count) as a single logical unit and a
/// snapshot never reads a torn tuple. The critical section is a few adds, so
/// writers are never blocked for long.
pub struct HistogramVec {
    label_keys: Vec<String>,
    bounds: Vec<f64>,
    cells: DashMap<LabelSet, Mutex<HistogramCell>>,
}

impl HistogramVec {
    pub fn new(label_keys: &[&str], bounds: &[f64]) -> Result<Self> {
        if bounds.is_empty() {
            return Err(ReqPulseError::InvalidBuckets(
                "at least one bucket bound is required".into(),
            ));
        }
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(ReqPulseError::InvalidBuckets(
                "bounds must be finite; +Inf is implicit".into(),
            ));
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ReqPulseError::InvalidBuckets(
                "bounds must be strictly ascending".into(),
            ));
        }
        Ok(Self {
            label_keys: label_keys.iter().map(|k| k.to_string()).collect(),
            bounds: bounds.to_vec(),
            cells: DashMap::new(),
        })
    }

    /// Record one observation: increments every bucket whose bound >= value,
    /// the running sum, and the total count, atomically as one unit.
    pub fn observe(&self, labels: &[(&str, &str)], value: f64) {
        let key = LabelSet::new(labels);
        debug_assert!(
            key.matches_keys(&self.label_keys),
            "label keys must match the metric schema"
        );
        let cell = self
            .cells
            .entry(key)
            .or_insert_with(|| Mutex::new(HistogramCell::new(self.bounds.len())));
        let mut guard = cell.lock();
        for (i, bound) in self.bounds.iter().enumerate() {
            if value <= *bound {
                guard.buckets[i] += 1;
            }
        }
        guard.sum += value;
        guard.count += 1;
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    pub fn label_keys(&self) -> &[String] {
        &self.label_keys
    }

    /// Number of live series (distinct label tuples seen so far).
    pub fn series(&self) -> usize {
        self.cells.len()
    }

    /// Consistent copy of one series, if it exists.
    pub fn get(&self, labels: &[(&str, &str)]) -> Option<HistogramCell> {
        self.cells
            .get(&LabelSet::new(labels))
            .map(|c| c.lock().clone())
    }

    /// Point-in-time view of every series, sorted for deterministic output.
    /// Each cell is copied under its own lock; the map itself is not frozen.
    pub(crate) fn collect(&self) -> Vec<(LabelSet, HistogramCell)> {
        let mut out: Vec<(LabelSet, HistogramCell)> = self
            .cells
            .iter()
            .map(|c| (c.key().clone(), c.value().lock().clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}
