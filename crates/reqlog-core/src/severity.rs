//! Politica de severidad por codigo de estado HTTP.
//!
//! Every completed request is logged at a level derived from its status
//! code. A request whose handler panicked ignores the table and always
//! uses [`Classification::panic_recover`].

use std::fmt;

use tracing::Level;

/// Log severity used for request records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Returns the matching `tracing` level.
    pub fn as_level(self) -> Level {
        match self {
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }

    /// Returns the lowercase name of the severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity plus the human readable message written with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    pub label: &'static str,
}

impl Classification {
    const fn new(severity: Severity, label: &'static str) -> Self {
        Self { severity, label }
    }

    /// Classification used when the handler panicked, regardless of status.
    pub const fn panic_recover() -> Self {
        Self::new(Severity::Error, "panic recover")
    }
}

/// Maps a status code to its severity and label.
///
/// Anything below 100, including an unset `0`, is an unknown status.
///
/// # Example
///
/// ```
/// use reqlog_core::{Severity, classify};
///
/// assert_eq!(classify(404).label, "client error");
/// assert_eq!(classify(0).severity, Severity::Warn);
/// ```
pub fn classify(status: u16) -> Classification {
    match status {
        500.. => Classification::new(Severity::Error, "server error"),
        400..=499 => Classification::new(Severity::Error, "client error"),
        300..=399 => Classification::new(Severity::Warn, "redirect"),
        200..=299 => Classification::new(Severity::Info, "success"),
        100..=199 => Classification::new(Severity::Info, "informative"),
        _ => Classification::new(Severity::Warn, "unknown status"),
    }
}
