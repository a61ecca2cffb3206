//! Instrumentation middleware wrapping request handlers.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::error::Result;
use crate::metrics::{CounterVec, Gauge, HistogramVec, Registry, DEFAULT_BUCKETS};

use super::handler::{Handler, Request};
use super::sink::{ResponseCapture, ResponseSink};

/// The aggregate bundle every instrumented request reports into.
///
/// Metric names and label schemas are the contract with the external
/// dashboard consumer; do not rename.
pub struct HttpMetrics {
    /// `http_requests_total{path,method,code}`
    pub requests_total: Arc<CounterVec>,
    /// `http_request_duration_seconds{path,method}`
    pub request_duration_seconds: Arc<HistogramVec>,
    /// `inflight_requests`
    pub inflight: Arc<Gauge>,
}

impl HttpMetrics {
    /// Register the request-level metrics into a registry being wired.
    pub fn register(registry: &mut Registry) -> Result<Self> {
        Ok(Self {
            requests_total: registry.register_counter(
                "http_requests_total",
                "Total HTTP requests.",
                &["path", "method", "code"],
            )?,
            request_duration_seconds: registry.register_histogram(
                "http_request_duration_seconds",
                "Request latency.",
                &["path", "method"],
                &DEFAULT_BUCKETS,
            )?,
            inflight: registry.register_gauge(
                "inflight_requests",
                "Current number of in-flight requests.",
            )?,
        })
    }
}

/// Decrements the in-flight gauge on drop, so the decrement runs on every
/// exit path: normal return, handler error, or a panic unwinding past us.
struct InflightGuard {
    gauge: Arc<Gauge>,
}

impl InflightGuard {
    fn enter(gauge: &Arc<Gauge>) -> Self {
        gauge.inc();
        Self {
            gauge: Arc::clone(gauge),
        }
    }
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}

/// Instrumentation middleware: composes around any [`Handler`], measures
/// duration, captures the committed status, and reports into the shared
/// aggregates. Holds no per-request state between calls; the aggregates are
/// the only shared resource.
pub struct Instrument<H> {
    metrics: Arc<HttpMetrics>,
    inner: H,
}

impl<H: Handler> Instrument<H> {
    pub fn new(metrics: Arc<HttpMetrics>, inner: H) -> Self {
        Self { metrics, inner }
    }

    /// Run one request through the wrapped handler.
    ///
    /// Exit accounting runs whether the handler returns `Ok` or `Err`; the
    /// error itself passes through unmodified — instrumentation must never
    /// mask a request failure. If the handler never writes a response the
    /// default status and the elapsed time so far are recorded. The latency
    /// observation happens before the counter increment, and the in-flight
    /// decrement (guard drop) strictly after both.
    pub async fn call(&self, req: &Request, sink: &mut dyn ResponseSink) -> Result<()> {
        let _inflight = InflightGuard::enter(&self.metrics.inflight);
        let start = Instant::now();

        let mut capture = ResponseCapture::new(sink);
        let outcome = self.inner.handle(req, &mut capture).await;

        let elapsed = start.elapsed().as_secs_f64();
        let code = capture.status().to_string();

        self.metrics
            .request_duration_seconds
            .observe(&[("path", &req.path), ("method", &req.method)], elapsed);
        self.metrics.requests_total.inc(&[
            ("path", &req.path),
            ("method", &req.method),
            ("code", &code),
        ]);

        outcome
    }

    pub fn metrics(&self) -> &Arc<HttpMetrics> {
        &self.metrics
    }
}

// Instrument is itself a Handler, so layers compose.
#[async_trait]
impl<H: Handler> Handler for Instrument<H> {
    async fn handle(&self, req: &Request, sink: &mut dyn ResponseSink) -> Result<()> {
        self.call(req, sink).await
    }
}
