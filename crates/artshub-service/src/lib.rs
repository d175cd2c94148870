//! # artshub-service
//!
//! Business logic service layer for ArtsHub. Each service orchestrates
//! repositories and the payment collaborator to implement application-level
//! use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod context;
pub mod payment;
pub mod pricing;

pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use catalog::CatalogService;
pub use context::{RequestContext, Requester};
pub use payment::{HttpPaymentGateway, NullPaymentGateway, gateway_from_config};
pub use pricing::PricingService;
