//! Axum router wiring and the transport adapter from axum requests to the
//! core handler seam.
//!
//! `/` and `/work` run through the instrumentation middleware; `/healthz` and
//! `/metrics` bypass it.

use axum::extract::{Request as AxumRequest, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;

use reqpulse_core::http::{BufferSink, Handler, Instrument, Request};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(serve_hello))
        .route("/work", any(serve_work))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}

async fn serve_hello(State(state): State<AppState>, request: AxumRequest) -> Response {
    serve(state.hello(), request).await
}

async fn serve_work(State(state): State<AppState>, request: AxumRequest) -> Response {
    serve(state.work(), request).await
}

/// Run one axum request through an instrumented handler: buffer the sink,
/// then build the response from the committed (status, body) parts.
async fn serve<H: Handler>(instr: &Instrument<H>, request: AxumRequest) -> Response {
    let req = Request::new(request.method().as_str(), request.uri().path());
    let mut sink = BufferSink::new();

    match instr.call(&req, &mut sink).await {
        Ok(()) => {
            let (code, body) = sink.into_parts();
            let status =
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body).into_response()
        }
        Err(e) => {
            // Exit accounting already ran inside the middleware; here we only
            // translate the propagated error for the client.
            tracing::error!(error = %e, path = %req.path, "handler failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}
