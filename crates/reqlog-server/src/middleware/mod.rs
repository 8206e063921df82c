//! Middleware stack para el servidor HTTP.
//!
//! - `RequestLogLayer`: registro estructurado por request, propagacion de
//!   X-Request-Id y recuperacion de panics del handler
//! - `fields`, `recover`, `request_id`: piezas usadas por la capa

pub mod fields;
mod logging;
pub mod recover;
mod request_id;

pub use logging::{
    Filter, RequestGuard, RequestLogLayer, RequestLogMiddleware, middleware, skip_paths,
};
pub use request_id::{REQUEST_ID_HEADER, ensure_request_id, set_response_request_id};
