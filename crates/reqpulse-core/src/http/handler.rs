//! Handler contract consumed by the instrumentation middleware.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

use super::sink::ResponseSink;

/// The request view instrumentation needs: routing identity only. The body,
/// headers, and everything else stay with the transport layer.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
}

impl Request {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
        }
    }
}

/// Any callable that accepts a request and a response sink. Errors propagate
/// unmodified through the middleware; panics unwind past it untouched.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, req: &Request, sink: &mut dyn ResponseSink) -> Result<()>;
}

#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
    async fn handle(&self, req: &Request, sink: &mut dyn ResponseSink) -> Result<()> {
        (**self).handle(req, sink).await
    }
}
