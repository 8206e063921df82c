//! Test helpers para reqlog-server.

#![allow(dead_code, unused_imports)]

pub mod capture;
pub mod client;

pub use capture::{CapturedEvent, capture};
pub use client::{TestClient, TestResponse, client, client_with_filter};
