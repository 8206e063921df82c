//! Rutas de demostracion.

use axum::{
    Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// GET / - plain greeting.
pub async fn hello() -> &'static str {
    "Hello, World!"
}

/// GET /error - divides by zero at runtime, so the handler panics.
pub async fn divide_by_zero() -> Json<i32> {
    let divisor = std::hint::black_box(0);
    Json(1 / divisor)
}

/// GET /status/{code} - answers with the requested status and an empty body.
pub async fn respond_with(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => status.into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}
