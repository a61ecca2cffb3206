use async_trait::async_trait;

use reqpulse_core::error::Result;
use reqpulse_core::http::{Handler, Request, ResponseSink};

/// Root handler: plain greeting, status left at the default.
#[derive(Default)]
pub struct HelloService;

impl HelloService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for HelloService {
    async fn handle(&self, _req: &Request, sink: &mut dyn ResponseSink) -> Result<()> {
        sink.write_body(b"hello\n");
        Ok(())
    }
}
