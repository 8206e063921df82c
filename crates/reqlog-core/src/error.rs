//! Failure descriptions attached to request records.
//!
//! A record carries at most one [`Failure`]. Only [`Failure::Panic`] is
//! paired with a stack capture; the other variants describe requests that
//! ended abnormally without a fault inside the handler.

use std::{any::Any, error::Error as StdError, io};

use thiserror::Error;

/// Why a request did not complete normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The handler panicked and the panic was recovered.
    #[error("{message}")]
    Panic {
        /// Text extracted from the panic payload
        message: String,
    },

    /// The inner service returned an error instead of a response.
    #[error("service error: {message}")]
    Service {
        /// Display text of the service error
        message: String,
    },

    /// The request future was dropped before the handler finished.
    #[error("request cancelled before completion")]
    Cancelled,
}

impl Failure {
    /// Fallback text for payloads that are neither strings nor errors.
    pub const UNKNOWN_PANIC: &'static str = "unknown panic payload";

    /// Builds a failure from a payload returned by `catch_unwind`.
    ///
    /// `panic!` produces `&'static str` or `String` payloads. Errors raised
    /// with `std::panic::panic_any` keep their display text when boxed as
    /// `Box<dyn StdError + Send (+ Sync)>` or when they are an `io::Error`.
    /// `Any` cannot be downcast to an unknown concrete error type, so any
    /// other payload becomes [`Failure::UNKNOWN_PANIC`]. Box custom errors
    /// before panicking with them.
    ///
    /// # Example
    ///
    /// ```
    /// use reqlog_core::Failure;
    ///
    /// let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("boom"));
    /// assert_eq!(Failure::from_panic(payload).to_string(), "boom");
    /// ```
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(e) = payload.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
            e.to_string()
        } else if let Some(e) = payload.downcast_ref::<Box<dyn StdError + Send>>() {
            e.to_string()
        } else if let Some(e) = payload.downcast_ref::<io::Error>() {
            e.to_string()
        } else {
            Self::UNKNOWN_PANIC.to_string()
        };

        Self::Panic { message }
    }

    /// Creates a Service failure from any displayable error.
    pub fn service(error: impl std::fmt::Display) -> Self {
        Self::Service {
            message: error.to_string(),
        }
    }

    /// Returns true if this failure comes from a recovered panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panic { .. })
    }
}
