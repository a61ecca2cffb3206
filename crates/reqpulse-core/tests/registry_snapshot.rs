//! Registry wiring, snapshot consistency, and text exposition tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use reqpulse_core::metrics::Registry;

#[test]
fn duplicate_metric_names_fail_fast() {
    let mut registry = Registry::new();
    registry
        .register_counter("http_requests_total", "help", &["path"])
        .unwrap();
    let err = registry
        .register_gauge("http_requests_total", "help")
        .expect_err("duplicate name must fail");
    assert!(err.to_string().contains("duplicate metric"));
}

#[test]
fn bad_bucket_list_fails_at_registration() {
    let mut registry = Registry::new();
    assert!(registry
        .register_histogram("latency", "help", &[], &[0.5, 0.1])
        .is_err());
}

#[test]
fn snapshot_is_idempotent_without_observations() {
    let mut registry = Registry::new();
    let counter = registry
        .register_counter("requests", "Total requests.", &["code"])
        .unwrap();
    let hist = registry
        .register_histogram("latency", "Latency.", &["path"], &[0.1, 1.0])
        .unwrap();
    let gauge = registry.register_gauge("inflight", "In flight.").unwrap();

    counter.inc(&[("code", "200")]);
    hist.observe(&[("path", "/")], 0.05);
    gauge.inc();

    let a = registry.snapshot();
    let b = registry.snapshot();
    assert_eq!(a, b);
    assert_eq!(
        reqpulse_core::metrics::registry::render_snapshot(&a),
        reqpulse_core::metrics::registry::render_snapshot(&b)
    );

    // A new observation must show up in the next snapshot.
    counter.inc(&[("code", "200")]);
    let c = registry.snapshot();
    assert_ne!(a, c);
}

#[test]
fn render_text_follows_exposition_conventions() {
    let mut registry = Registry::new();
    let counter = registry
        .register_counter("http_requests_total", "Total HTTP requests.", &[
            "path", "method", "code",
        ])
        .unwrap();
    let hist = registry
        .register_histogram(
            "http_request_duration_seconds",
            "Request latency.",
            &["path", "method"],
            &[0.1, 1.0],
        )
        .unwrap();
    let gauge = registry
        .register_gauge("inflight_requests", "Current in-flight.")
        .unwrap();

    counter.inc(&[("path", "/work"), ("method", "GET"), ("code", "200")]);
    hist.observe(&[("path", "/work"), ("method", "GET")], 0.05);
    hist.observe(&[("path", "/work"), ("method", "GET")], 5.0);
    gauge.set(3);

    let text = registry.render_text();

    assert!(text.contains("# TYPE http_requests_total counter"));
    assert!(text
        .contains("http_requests_total{code=\"200\",method=\"GET\",path=\"/work\"} 1"));

    assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
    assert!(text.contains(
        "http_request_duration_seconds_bucket{method=\"GET\",path=\"/work\",le=\"0.1\"} 1"
    ));
    assert!(text.contains(
        "http_request_duration_seconds_bucket{method=\"GET\",path=\"/work\",le=\"1\"} 1"
    ));
    assert!(text.contains(
        "http_request_duration_seconds_bucket{method=\"GET\",path=\"/work\",le=\"+Inf\"} 2"
    ));
    assert!(text
        .contains("http_request_duration_seconds_count{method=\"GET\",path=\"/work\"} 2"));

    assert!(text.contains("# TYPE inflight_requests gauge"));
    assert!(text.contains("inflight_requests 3"));
}

#[test]
fn render_escapes_label_values() {
    let mut registry = Registry::new();
    let counter = registry.register_counter("odd", "help", &["v"]).unwrap();
    counter.inc(&[("v", "a\"b\nc")]);
    let text = registry.render_text();
    assert!(text.contains("odd{v=\"a\\\"b\\nc\"} 1"));
}

#[test]
fn snapshot_serializes_to_json() {
    let mut registry = Registry::new();
    let counter = registry.register_counter("requests", "help", &["code"]).unwrap();
    counter.inc(&[("code", "200")]);

    let json = serde_json::to_value(registry.snapshot()).unwrap();
    let metric = &json["metrics"][0];
    assert_eq!(metric["name"], "requests");
    assert_eq!(metric["kind"], "counter");
    assert_eq!(metric["series"][0]["value"]["counter"]["value"], 1);
}
