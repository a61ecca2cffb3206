//! End-to-end scenario: concurrent instrumented requests against the
//! simulated workload, checked through the exposition surface.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use reqpulse_core::http::{BufferSink, Request};
use reqpulse_server::app_state::AppState;
use reqpulse_server::config::ServerConfig;

fn scenario_config() -> ServerConfig {
    let mut cfg = ServerConfig::default();
    // Short sleeps keep the test fast; the failure ratio matches the demo.
    cfg.workload.sleep_min_ms = 1;
    cfg.workload.sleep_max_ms = 5;
    cfg.workload.failure_ratio = 0.1;
    cfg
}

#[tokio::test(flavor = "multi_thread")]
async fn hundred_concurrent_work_requests() {
    const N: u64 = 100;

    let state = AppState::new(scenario_config()).unwrap();

    let mut tasks = Vec::new();
    for _ in 0..N {
        let state = state.clone();
        tasks.push(tokio::spawn(async move {
            let mut sink = BufferSink::new();
            state
                .work()
                .call(&Request::new("GET", "/work"), &mut sink)
                .await
                .unwrap();
            sink.into_parts()
        }));
    }

    let mut ok = 0u64;
    let mut failed = 0u64;
    for t in tasks {
        let (status, body) = t.await.unwrap();
        match status {
            200 => {
                ok += 1;
                assert_eq!(body, b"done\n");
            }
            500 => {
                failed += 1;
                assert_eq!(body, b"oops\n");
            }
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(ok + failed, N);

    let m = state.http_metrics();
    assert_eq!(m.requests_total.total(), N);
    assert_eq!(
        m.requests_total
            .get(&[("path", "/work"), ("method", "GET"), ("code", "200")]),
        ok
    );
    assert_eq!(
        m.requests_total
            .get(&[("path", "/work"), ("method", "GET"), ("code", "500")]),
        failed
    );
    assert_eq!(m.inflight.get(), 0);

    let cell = m
        .request_duration_seconds
        .get(&[("path", "/work"), ("method", "GET")])
        .unwrap();
    assert_eq!(cell.count, N);
    assert!(cell.sum > 0.0);

    // Failure ratio 0.1 over 100 draws: allow a wide sampling tolerance.
    assert!(failed <= 30, "failure count {failed} implausibly high");

    // Business counter mirrors the per-request outcomes.
    assert_eq!(state.items_processed().get(&[("result", "ok")]), ok);
    assert_eq!(state.items_processed().get(&[("result", "error")]), failed);

    // Everything above is visible through the exposition surface.
    let text = state.registry().render_text();
    assert!(text.contains("# TYPE http_requests_total counter"));
    assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
    assert!(text.contains("inflight_requests 0"));
    assert!(text.contains("# TYPE items_processed_total counter"));
}

#[tokio::test]
async fn hello_route_records_the_root_path() {
    let state = AppState::new(ServerConfig::default()).unwrap();

    let mut sink = BufferSink::new();
    state
        .hello()
        .call(&Request::new("GET", "/"), &mut sink)
        .await
        .unwrap();

    assert_eq!(sink.body(), b"hello\n");
    assert_eq!(
        state
            .http_metrics()
            .requests_total
            .get(&[("path", "/"), ("method", "GET"), ("code", "200")]),
        1
    );
}

#[tokio::test]
async fn snapshot_is_stable_between_requests() {
    let state = AppState::new(ServerConfig::default()).unwrap();

    let mut sink = BufferSink::new();
    state
        .hello()
        .call(&Request::new("GET", "/"), &mut sink)
        .await
        .unwrap();

    let a = state.registry().snapshot();
    let b = state.registry().snapshot();
    assert_eq!(a, b);
}
