//! Reqlog Core - Request log record and severity policy
//!
//! This crate provides the transport-agnostic pieces of the request logger:
//! the per-request [`RequestLogRecord`], the status-to-severity policy in
//! [`classify`], the [`Failure`] taxonomy and the [`emit`] function that
//! writes a completed record as a single `tracing` event.
//!
//! # Example
//!
//! ```
//! use reqlog_core::{RequestLogRecord, Severity, classify};
//!
//! let record = RequestLogRecord::new("abc-123").with_method("GET").with_path("/");
//! let classification = classify(200);
//!
//! assert_eq!(classification.severity, Severity::Info);
//! assert_eq!(classification.label, "success");
//! assert_eq!(record.id(), "abc-123");
//! ```

pub mod emit;
pub mod error;
pub mod marshal;
pub mod record;
pub mod severity;

pub use emit::{REQUEST_TAG, emit};
pub use error::Failure;
pub use marshal::{MARSHAL_ERROR_PREFIX, marshal};
pub use record::RequestLogRecord;
pub use severity::{Classification, Severity, classify};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
