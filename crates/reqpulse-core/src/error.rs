//! Shared error type across reqpulse crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, ReqPulseError>;

/// Unified error type used by core and server.
///
/// Metric mutation never fails at runtime; everything here is either a
/// wiring-time error (bad config, bad bucket list, duplicate registration)
/// or a handler error passing through the middleware.
#[derive(Debug, Error)]
pub enum ReqPulseError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("invalid buckets: {0}")]
    InvalidBuckets(String),
    #[error("duplicate metric: {0}")]
    DuplicateMetric(String),
    #[error("handler failed: {0}")]
    Handler(String),
    #[error("internal: {0}")]
    Internal(String),
}
