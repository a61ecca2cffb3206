//! reqpulse core: concurrency-safe metric aggregates and the HTTP
//! instrumentation seam.
//!
//! This crate defines the aggregate model (counters, histograms, gauge), the
//! owning registry with snapshot/exposition, and the handler/response-sink
//! contracts the instrumentation middleware wraps. It carries no HTTP
//! transport dependency so the whole core can be exercised in plain tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ReqPulseError`/`Result`; metric
//! updates on the hot path are infallible by construction.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod http;
pub mod metrics;

/// Shared result type.
pub use error::{ReqPulseError, Result};
