//! Owning metric registry: wiring-time registration, point-in-time
//! snapshots, and Prometheus text exposition.

use std::fmt::Write;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{ReqPulseError, Result};

use super::counter::CounterVec;
use super::gauge::Gauge;
use super::histogram::HistogramVec;

enum Aggregate {
    Counter(Arc<CounterVec>),
    Histogram(Arc<HistogramVec>),
    Gauge(Arc<Gauge>),
}

struct Entry {
    name: String,
    help: String,
    aggregate: Aggregate,
}

/// Owning mapping from metric name to aggregate instance.
///
/// Built once at startup (`register_*` takes `&mut self`, duplicate names
/// fail fast), then shared read-only; the aggregates themselves stay mutable
/// through their own interior synchronization. No global singleton: tests
/// construct a fresh registry each.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_counter(
        &mut self,
        name: &str,
        help: &str,
        label_keys: &[&str],
    ) -> Result<Arc<CounterVec>> {
        self.ensure_unique(name)?;
        let counter = Arc::new(CounterVec::new(label_keys));
        self.entries.push(Entry {
            name: name.to_string(),
            help: help.to_string(),
            aggregate: Aggregate::Counter(Arc::clone(&counter)),
        });
        tracing::debug!(%name, kind = "counter", "metric registered");
        Ok(counter)
    }

    pub fn register_histogram(
        &mut self,
        name: &str,
        help: &str,
        label_keys: &[&str],
        bounds: &[f64],
    ) -> Result<Arc<HistogramVec>> {
        self.ensure_unique(name)?;
        let histogram = Arc::new(HistogramVec::new(label_keys, bounds)?);
        self.entries.push(Entry {
            name: name.to_string(),
            help: help.to_string(),
            aggregate: Aggregate::Histogram(Arc::clone(&histogram)),
        });
        tracing::debug!(%name, kind = "histogram", "metric registered");
        Ok(histogram)
    }

    pub fn register_gauge(&mut self, name: &str, help: &str) -> Result<Arc<Gauge>> {
        self.ensure_unique(name)?;
        let gauge = Arc::new(Gauge::new());
        self.entries.push(Entry {
            name: name.to_string(),
            help: help.to_string(),
            aggregate: Aggregate::Gauge(Arc::clone(&gauge)),
        });
        tracing::debug!(%name, kind = "gauge", "metric registered");
        Ok(gauge)
    }

    fn ensure_unique(&self, name: &str) -> Result<()> {
        if self.entries.iter().any(|e| e.name == name) {
            return Err(ReqPulseError::DuplicateMetric(name.to_string()));
        }
        Ok(())
    }

    /// Consistent point-in-time view of every registered aggregate, in
    /// registration order with series sorted by label tuple. Histogram cells
    /// are copied under their per-cell lock; counters and gauges are atomic
    /// loads. Taking two snapshots with no intervening observations yields
    /// identical values.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let metrics = self
            .entries
            .iter()
            .map(|e| {
                let (kind, series) = match &e.aggregate {
                    Aggregate::Counter(c) => (
                        MetricKind::Counter,
                        c.collect()
                            .into_iter()
                            .map(|(labels, value)| SeriesSnapshot {
                                labels: labels.pairs().to_vec(),
                                value: SeriesValue::Counter { value },
                            })
                            .collect(),
                    ),
                    Aggregate::Histogram(h) => (
                        MetricKind::Histogram,
                        h.collect()
                            .into_iter()
                            .map(|(labels, cell)| SeriesSnapshot {
                                labels: labels.pairs().to_vec(),
                                value: SeriesValue::Histogram {
                                    buckets: h
                                        .bounds()
                                        .iter()
                                        .zip(&cell.buckets)
                                        .map(|(le, cumulative)| BucketSnapshot {
                                            le: *le,
                                            cumulative: *cumulative,
                                        })
                                        .collect(),
                                    sum: cell.sum,
                                    count: cell.count,
                                },
                            })
                            .collect(),
                    ),
                    Aggregate::Gauge(g) => (
                        MetricKind::Gauge,
                        vec![SeriesSnapshot {
                            labels: Vec::new(),
                            value: SeriesValue::Gauge { value: g.get() },
                        }],
                    ),
                };
                MetricSnapshot {
                    name: e.name.clone(),
                    help: e.help.clone(),
                    kind,
                    series,
                }
            })
            .collect();
        RegistrySnapshot { metrics }
    }

    /// Render every registered metric in Prometheus text exposition format.
    pub fn render_text(&self) -> String {
        render_snapshot(&self.snapshot())
    }
}

/// Render a snapshot in Prometheus text exposition format. Output order is
/// deterministic: registration order, series sorted by label tuple.
pub fn render_snapshot(snap: &RegistrySnapshot) -> String {
    let mut out = String::new();
    for m in &snap.metrics {
        let _ = writeln!(out, "# HELP {} {}", m.name, m.help);
        let _ = writeln!(out, "# TYPE {} {}", m.name, m.kind.as_str());
        for s in &m.series {
            let label_str = render_labels(&s.labels);
            match &s.value {
                SeriesValue::Counter { value } => {
                    let _ = writeln!(out, "{}{} {}", m.name, braced(&label_str), value);
                }
                SeriesValue::Gauge { value } => {
                    let _ = writeln!(out, "{}{} {}", m.name, braced(&label_str), value);
                }
                SeriesValue::Histogram { buckets, sum, count } => {
                    let prefix = if label_str.is_empty() {
                        String::new()
                    } else {
                        format!("{label_str},")
                    };
                    for b in buckets {
                        let _ = writeln!(
                            out,
                            "{}_bucket{{{}le=\"{}\"}} {}",
                            m.name, prefix, b.le, b.cumulative
                        );
                    }
                    let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", m.name, prefix, count);
                    let _ = writeln!(out, "{}_sum{} {}", m.name, braced(&label_str), sum);
                    let _ = writeln!(out, "{}_count{} {}", m.name, braced(&label_str), count);
                }
            }
        }
    }
    out
}

fn render_labels(labels: &[(String, String)]) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, super::labels::escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn braced(label_str: &str) -> String {
    if label_str.is_empty() {
        String::new()
    } else {
        format!("{{{label_str}}}")
    }
}

/// Structured point-in-time view of the whole registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrySnapshot {
    pub metrics: Vec<MetricSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSnapshot {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub series: Vec<SeriesSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Histogram,
    Gauge,
}

impl MetricKind {
    /// Name used in `# TYPE` exposition lines.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Histogram => "histogram",
            MetricKind::Gauge => "gauge",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSnapshot {
    pub labels: Vec<(String, String)>,
    pub value: SeriesValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesValue {
    Counter { value: u64 },
    Histogram { buckets: Vec<BucketSnapshot>, sum: f64, count: u64 },
    Gauge { value: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSnapshot {
    pub le: f64,
    pub cumulative: u64,
}
