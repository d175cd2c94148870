//! # artshub-core
//!
//! Core crate for ArtsHub. Contains configuration schemas, the unified
//! error system, shared pagination types, and the traits that describe
//! external collaborators (payment processor).
//!
//! This crate has **no** internal dependencies on other ArtsHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
