//! Booking lifecycle orchestration.

pub mod service;

pub use service::{BookingService, CreateBookingRequest, PaymentOutcome};
