//! HTTP instrumentation seam: handler/sink contracts, response capture, and
//! the middleware that reports every request into the shared aggregates.

pub mod handler;
pub mod instrument;
pub mod sink;

pub use handler::{Handler, Request};
pub use instrument::{HttpMetrics, Instrument};
pub use sink::{BufferSink, ResponseCapture, ResponseSink, DEFAULT_STATUS};
