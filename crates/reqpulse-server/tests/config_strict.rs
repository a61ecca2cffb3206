#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use reqpulse_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
workload:
  sleep_minn_ms: 50 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("bad config"));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.workload.sleep_min_ms, 50);
    assert_eq!(cfg.workload.sleep_max_ms, 250);
    assert!((cfg.workload.failure_ratio - 0.1).abs() < 1e-12);
}

#[test]
fn rejects_unsupported_version() {
    let bad = "version: 2\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_invalid_listen_address() {
    let bad = r#"
version: 1
server:
  listen: "not-an-addr"
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_inverted_sleep_range() {
    let bad = r#"
version: 1
workload:
  sleep_min_ms: 300
  sleep_max_ms: 100
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_out_of_range_failure_ratio() {
    let bad = r#"
version: 1
workload:
  failure_ratio: 1.5
"#;
    assert!(config::load_from_str(bad).is_err());

    let also_bad = r#"
version: 1
workload:
  failure_ratio: -0.1
"#;
    assert!(config::load_from_str(also_bad).is_err());
}
