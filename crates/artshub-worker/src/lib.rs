//! Background maintenance for ArtsHub.
//!
//! This crate provides:
//! - A cron scheduler for periodic booking maintenance
//! - The pending-payment expiry sweep
//! - The completion sweep for elapsed confirmed bookings

pub mod scheduler;
pub mod tasks;

pub use scheduler::CronScheduler;
