//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use artshub_core::config::AppConfig;
use artshub_service::availability::AvailabilityService;
use artshub_service::booking::BookingService;
use artshub_service::catalog::CatalogService;
use artshub_service::pricing::PricingService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Catalog management service
    pub catalog_service: Arc<CatalogService>,
    /// Availability read service
    pub availability_service: Arc<AvailabilityService>,
    /// Quote computation service
    pub pricing_service: Arc<PricingService>,
    /// Booking lifecycle service
    pub booking_service: Arc<BookingService>,
}
