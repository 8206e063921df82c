//! Per-request log record.

use std::time::Duration;

use crate::error::Failure;

/// Structured summary of one HTTP request.
///
/// The identity fields are filled when the request enters the middleware.
/// [`RequestLogRecord::finish`] sets the outcome once the handler has
/// returned or failed, right before the record is emitted.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use reqlog_core::RequestLogRecord;
///
/// let record = RequestLogRecord::new("req-1")
///     .with_method("POST")
///     .with_path("/orders")
///     .finish(201, Duration::from_millis(1500));
///
/// assert_eq!(record.status_code(), 201);
/// assert_eq!(record.latency(), 1.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestLogRecord {
    id: String,
    remote_ip: String,
    host: String,
    method: String,
    path: String,
    protocol: String,
    status_code: u16,
    latency: f64,
    failure: Option<Failure>,
    stack: Option<String>,
}

impl RequestLogRecord {
    /// Creates a record for the given correlation id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_remote_ip(mut self, remote_ip: impl Into<String>) -> Self {
        self.remote_ip = remote_ip.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Attaches a failure that did not come from a panic (no stack).
    pub fn with_failure(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Attaches a recovered panic together with its stack capture.
    pub fn with_panic(mut self, failure: Failure, stack: impl Into<String>) -> Self {
        self.failure = Some(failure);
        self.stack = Some(stack.into());
        self
    }

    /// Sets the final status code and the elapsed time in seconds.
    pub fn finish(mut self, status_code: u16, elapsed: Duration) -> Self {
        self.status_code = status_code;
        self.latency = elapsed.as_secs_f64();
        self
    }

    // ============================================
    // Accessors
    // ============================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn remote_ip(&self) -> &str {
        &self.remote_ip
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Elapsed time in seconds.
    pub fn latency(&self) -> f64 {
        self.latency
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// Returns true if the handler panicked while serving this request.
    pub fn panicked(&self) -> bool {
        self.failure.as_ref().is_some_and(Failure::is_panic)
    }
}
