//! Recoleccion de campos del request.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, header},
};
use reqlog_core::RequestLogRecord;
use tokio::time::Instant;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Record whose identity is known but whose outcome is not yet.
#[derive(Debug)]
pub struct PendingRecord {
    record: RequestLogRecord,
    started: Instant,
}

impl PendingRecord {
    /// Returns the identity fields collected so far.
    pub fn record(&self) -> &RequestLogRecord {
        &self.record
    }

    /// Completes the record with the final status and the elapsed time.
    ///
    /// Elapsed time comes from tokio's monotonic clock, so wall clock
    /// adjustments never produce a negative latency.
    pub fn finish(self, status: u16) -> RequestLogRecord {
        let elapsed = self.started.elapsed();
        self.record.finish(status, elapsed)
    }
}

/// Captures request metadata and starts the latency timer.
pub fn start(request: &Request<Body>, request_id: &str) -> PendingRecord {
    let record = RequestLogRecord::new(request_id)
        .with_remote_ip(remote_ip(request))
        .with_host(host(request))
        .with_method(request.method().as_str())
        .with_path(request.uri().path())
        .with_protocol(protocol(request));

    PendingRecord {
        record,
        started: Instant::now(),
    }
}

fn remote_ip(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default()
}

fn host(request: &Request<Body>) -> String {
    request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().authority().map(|a| a.as_str()))
        .unwrap_or_default()
        .to_string()
}

// Scheme seen by the client; behind a proxy the URI has none.
fn protocol(request: &Request<Body>) -> String {
    if let Some(scheme) = request.uri().scheme_str() {
        return scheme.to_string();
    }

    request
        .headers()
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "http".to_string())
}
