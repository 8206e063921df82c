//! Errores del servidor.

use std::net::AddrParseError;

use thiserror::Error;

/// Errors raised while configuring or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Settings could not be loaded or deserialized.
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// The configured host/port is not a socket address.
    #[error("Invalid listen address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: AddrParseError,
    },

    /// A process-wide logger was already installed.
    #[error("Logger already initialized: {0}")]
    Logging(#[from] tracing::dispatcher::SetGlobalDefaultError),

    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
