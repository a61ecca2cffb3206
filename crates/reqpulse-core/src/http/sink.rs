//! Response-sink capability and the status-capturing decorator.

/// Status assumed when a handler writes body bytes without ever setting one.
pub const DEFAULT_STATUS: u16 = 200;

/// Write-side capability a handler uses to produce its response.
///
/// `set_status` may be called more than once; the last call before the
/// response is committed wins. No return value is required for success.
pub trait ResponseSink: Send {
    fn set_status(&mut self, code: u16);
    fn write_body(&mut self, bytes: &[u8]);
}

/// Decorator recording the status code the handler commits, without altering
/// the underlying write behavior. Implements the same capability interface so
/// handlers cannot tell they are being observed.
pub struct ResponseCapture<'a> {
    inner: &'a mut dyn ResponseSink,
    status: Option<u16>,
}

impl<'a> ResponseCapture<'a> {
    pub fn new(inner: &'a mut dyn ResponseSink) -> Self {
        Self { inner, status: None }
    }

    /// The status the client will observe: the most recent explicitly set
    /// code, or [`DEFAULT_STATUS`] if none was ever set.
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(DEFAULT_STATUS)
    }
}

impl ResponseSink for ResponseCapture<'_> {
    fn set_status(&mut self, code: u16) {
        self.status = Some(code);
        self.inner.set_status(code);
    }

    fn write_body(&mut self, bytes: &[u8]) {
        self.inner.write_body(bytes);
    }
}

/// In-memory sink buffering status and body until a response is built from
/// the parts. Used by the server's transport adapter and by tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    status: Option<u16>,
    body: Vec<u8>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> u16 {
        self.status.unwrap_or(DEFAULT_STATUS)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_parts(self) -> (u16, Vec<u8>) {
        (self.status.unwrap_or(DEFAULT_STATUS), self.body)
    }
}

impl ResponseSink for BufferSink {
    fn set_status(&mut self, code: u16) {
        self.status = Some(code);
    }

    fn write_body(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }
}
