//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl and the kind-to-status table live in
//! `artshub_core::error`: Rust's orphan rule requires the impl to be in the
//! crate that defines `AppError`. This module re-exports the HTTP-facing
//! pieces so the API crate remains the canonical import path.

pub use artshub_core::error::{ApiErrorResponse, status_for};
