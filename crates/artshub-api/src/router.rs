//! Route definitions for the ArtsHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(resource_routes())
        .merge(booking_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Catalog, availability, quote, and schedule endpoints
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/resources", get(handlers::resource::list_resources))
        .route("/resources", post(handlers::resource::create_resource))
        .route("/resources/{id}", get(handlers::resource::get_resource))
        .route("/resources/{id}", put(handlers::resource::update_resource))
        .route(
            "/resources/{id}/availability",
            get(handlers::resource::availability),
        )
        .route("/resources/{id}/quote", get(handlers::resource::quote))
        .route(
            "/resources/{id}/schedule",
            get(handlers::resource::schedule),
        )
}

/// Booking lifecycle endpoints
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(handlers::booking::create_booking))
        .route("/bookings", get(handlers::booking::list_my_bookings))
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/confirm-payment",
            post(handlers::booking::confirm_payment),
        )
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
        .route(
            "/bookings/{id}/no-show",
            post(handlers::booking::mark_no_show),
        )
}

/// Health check endpoint (no caller context required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
