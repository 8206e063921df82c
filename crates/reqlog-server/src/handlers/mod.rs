pub mod demo;
pub mod health;

pub use demo::{divide_by_zero, hello, respond_with};
pub use health::{HealthResponse, health_check};
