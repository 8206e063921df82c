//! JSON encoding that never fails.

use serde::Serialize;

/// Prefix of the payload returned when encoding fails.
pub const MARSHAL_ERROR_PREFIX: &str = "Marshal error: ";

/// Serializes `value` as JSON bytes.
///
/// If serialization fails the error itself becomes the payload, as
/// `Marshal error: <cause>`, so callers on the response path always have
/// something to write.
///
/// # Example
///
/// ```
/// use reqlog_core::marshal;
///
/// let body = marshal(&serde_json::json!({"status": "OK"}));
/// assert_eq!(body, br#"{"status":"OK"}"#);
/// ```
pub fn marshal<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(e) => format!("{}{}", MARSHAL_ERROR_PREFIX, e).into_bytes(),
    }
}
