//! reqpulse server library entry.
//!
//! This crate wires the config, app state, axum router, operational
//! endpoints, and the demo workload handlers into a runnable service. It is
//! intended to be consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;
pub mod services;
