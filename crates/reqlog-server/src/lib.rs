//! Reqlog Server - request logging middleware for axum/tower
//!
//! Wraps a router so every request produces exactly one structured
//! `tracing` event, carries an `x-request-id`, and turns handler panics
//! into a `500 {"status":"Internal Server Error"}` response.
//!
//! ```no_run
//! use axum::{Router, routing::get};
//! use reqlog_server::{logger, middleware::{middleware, skip_paths}};
//!
//! let log = logger::new_logger(std::io::stderr, "debug");
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "Hello, World!" }))
//!     .layer(middleware(log, Some(skip_paths(["/health"]))));
//! ```

pub mod error;
pub mod handlers;
pub mod logger;
pub mod middleware;
pub mod server;
pub mod settings;

pub use error::ServerError;
pub use handlers::HealthResponse;
pub use server::{create_router, filter_from, run_server, serve};
pub use settings::{LogFormat, LogSettings, Settings};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
