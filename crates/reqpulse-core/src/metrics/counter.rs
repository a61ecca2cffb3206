//! Monotone counter with dynamic labels.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::labels::LabelSet;

/// Monotonically non-decreasing accumulator, one cell per distinct label
/// tuple. Cells are created lazily on first increment and never removed.
///
/// Monotonicity is enforced by the unsigned delta type: there is no decrement
/// and no negative delta to reject at runtime.
pub struct CounterVec {
    label_keys: Vec<String>,
    cells: DashMap<LabelSet, AtomicU64>,
}

impl CounterVec {
    pub fn new(label_keys: &[&str]) -> Self {
        Self {
            label_keys: label_keys.iter().map(|k| k.to_string()).collect(),
            cells: DashMap::new(),
        }
    }

    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary delta.
    pub fn add(&self, labels: &[(&str, &str)], delta: u64) {
        let key = LabelSet::new(labels);
        debug_assert!(
            key.matches_keys(&self.label_keys),
            "label keys must match the metric schema"
        );
        let cell = self.cells.entry(key).or_insert_with(|| AtomicU64::new(0));
        cell.fetch_add(delta, Ordering::Relaxed);
    }

    /// Current value for one label tuple (0 if the series does not exist yet).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.cells
            .get(&LabelSet::new(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum across all series.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Number of live series (distinct label tuples seen so far).
    pub fn series(&self) -> usize {
        self.cells.len()
    }

    pub fn label_keys(&self) -> &[String] {
        &self.label_keys
    }

    /// Point-in-time view of every series, sorted for deterministic output.
    pub(crate) fn collect(&self) -> Vec<(LabelSet, u64)> {
        let mut out: Vec<(LabelSet, u64)> = self
            .cells
            .iter()
            .map(|c| (c.key().clone(), c.value().load(Ordering::Relaxed)))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}
