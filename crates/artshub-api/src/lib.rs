//! # artshub-api
//!
//! HTTP API layer for ArtsHub built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, compression, logging),
//! extractors, DTOs, and the `AppError` to HTTP status mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
