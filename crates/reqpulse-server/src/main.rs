//! reqpulse server
//!
//! HTTP demo service with request-level observability:
//! - `/` and `/work` run through the instrumentation middleware
//! - `/metrics` exposes the aggregates in Prometheus text format
//! - `/healthz` liveness probe

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use reqpulse_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_or_default("reqpulse.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("app state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "reqpulse-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
