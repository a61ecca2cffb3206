//! Shared application state for the reqpulse server.

use std::sync::Arc;

use reqpulse_core::error::Result;
use reqpulse_core::http::{HttpMetrics, Instrument};
use reqpulse_core::metrics::{CounterVec, Registry};

use crate::config::ServerConfig;
use crate::services::{HelloService, WorkService};

/// Cheap-to-clone handle over the process-wide wiring: the metric registry,
/// the request-level aggregate bundle, and the instrumented handlers.
///
/// Built once in `new`; the registry is read-only afterwards. No implicit
/// singletons, so tests construct a fresh state per test.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    registry: Registry,
    http_metrics: Arc<HttpMetrics>,
    items_processed: Arc<CounterVec>,
    work: Instrument<WorkService>,
    hello: Instrument<HelloService>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle wiring errors gracefully (no panic).
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        cfg.validate()?;

        let mut registry = Registry::new();
        let http_metrics = Arc::new(HttpMetrics::register(&mut registry)?);
        let items_processed = registry.register_counter(
            "items_processed_total",
            "Business counter for processed items.",
            &["result"],
        )?;

        let work = Instrument::new(
            Arc::clone(&http_metrics),
            WorkService::new(cfg.workload.clone(), Arc::clone(&items_processed)),
        );
        let hello = Instrument::new(Arc::clone(&http_metrics), HelloService::new());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                http_metrics,
                items_processed,
                work,
                hello,
            }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn http_metrics(&self) -> &Arc<HttpMetrics> {
        &self.inner.http_metrics
    }

    pub fn items_processed(&self) -> &Arc<CounterVec> {
        &self.inner.items_processed
    }

    pub fn work(&self) -> &Instrument<WorkService> {
        &self.inner.work
    }

    pub fn hello(&self) -> &Instrument<HelloService> {
        &self.inner.hello
    }
}
