//! Route handlers organized by domain.

pub mod booking;
pub mod health;
pub mod resource;
