use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use reqpulse_core::error::Result;
use reqpulse_core::http::{Handler, Request, ResponseSink};
use reqpulse_core::metrics::CounterVec;

use crate::config::WorkloadSection;

/// Simulated workload: sleeps a uniform random interval, then fails with the
/// configured probability. Each outcome increments the
/// `items_processed_total{result}` business counter.
pub struct WorkService {
    cfg: WorkloadSection,
    items_processed: Arc<CounterVec>,
}

impl WorkService {
    pub fn new(cfg: WorkloadSection, items_processed: Arc<CounterVec>) -> Self {
        Self {
            cfg,
            items_processed,
        }
    }
}

#[async_trait]
impl Handler for WorkService {
    async fn handle(&self, _req: &Request, sink: &mut dyn ResponseSink) -> Result<()> {
        // Draw before the await: ThreadRng must not be held across it.
        let (sleep_ms, fail) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(self.cfg.sleep_min_ms..=self.cfg.sleep_max_ms),
                rng.gen_bool(self.cfg.failure_ratio),
            )
        };

        tokio::time::sleep(Duration::from_millis(sleep_ms)).await;

        if fail {
            self.items_processed.inc(&[("result", "error")]);
            sink.set_status(500);
            sink.write_body(b"oops\n");
        } else {
            self.items_processed.inc(&[("result", "ok")]);
            sink.write_body(b"done\n");
        }
        Ok(())
    }
}
