//! Emision del registro como evento estructurado de `tracing`.
//!
//! A completed [`RequestLogRecord`] is written as exactly one event with
//! fixed field names, so log pipelines can index them:
//!
//! | field         | value                                  |
//! |---------------|----------------------------------------|
//! | `id`          | correlation id                         |
//! | `remote_ip`   | client address                         |
//! | `host`        | requested host                         |
//! | `method`      | HTTP method                            |
//! | `path`        | request path                           |
//! | `protocol`    | `http` / `https`                       |
//! | `status_code` | final status code                      |
//! | `latency`     | elapsed seconds                        |
//! | `tag`         | always `"request"`                     |
//! | `error`       | failure description, only when present |
//! | `stack`       | panic backtrace, only when present     |
//!
//! The event message is the classification label.

use tracing::Dispatch;
use tracing::field::display;

use crate::record::RequestLogRecord;
use crate::severity::{Classification, Severity};

/// Value of the `tag` field on every request event.
pub const REQUEST_TAG: &str = "request";

macro_rules! request_event {
    ($level:expr, $record:expr, $message:expr) => {
        tracing::event!(
            target: "reqlog",
            $level,
            id = $record.id(),
            remote_ip = $record.remote_ip(),
            host = $record.host(),
            method = $record.method(),
            path = $record.path(),
            protocol = $record.protocol(),
            status_code = $record.status_code(),
            latency = $record.latency(),
            tag = REQUEST_TAG,
            error = $record.failure().map(display),
            stack = $record.stack(),
            "{}",
            $message
        )
    };
}

/// Writes `record` to `logger` at the classified severity.
///
/// The event is dispatched synchronously on the calling thread.
pub fn emit(logger: &Dispatch, classification: Classification, record: &RequestLogRecord) {
    tracing::dispatcher::with_default(logger, || match classification.severity {
        Severity::Info => request_event!(tracing::Level::INFO, record, classification.label),
        Severity::Warn => request_event!(tracing::Level::WARN, record, classification.label),
        Severity::Error => request_event!(tracing::Level::ERROR, record, classification.label),
    });
}
