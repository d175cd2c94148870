//! Booking lifecycle handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use artshub_core::error::AppError;
use artshub_service::booking::{CreateBookingRequest as SvcCreateBooking, PaymentOutcome};

use crate::dto::request::{ConfirmPaymentRequest, CreateBookingRequest};
use crate::extractors::{Caller, PaginationParams};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let booking = state
        .booking_service
        .create(
            &caller,
            SvcCreateBooking {
                resource_id: req.resource_id,
                starts_at: req.starts_at,
                ends_at: req.ends_at,
                participant_count: req.participant_count,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": booking })))
}

/// GET /api/bookings
pub async fn list_my_bookings(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let page = state
        .booking_service
        .list_mine(&caller, params.into_page_request())
        .await?;

    Ok(Json(json!({ "success": true, "data": page })))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let booking = state.booking_service.get(&caller, id).await?;
    Ok(Json(json!({ "success": true, "data": booking })))
}

/// POST /api/bookings/{id}/confirm-payment
pub async fn confirm_payment(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(req): Json<ConfirmPaymentRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let booking = state
        .booking_service
        .confirm_payment(
            &caller,
            id,
            PaymentOutcome {
                succeeded: req.succeeded,
                reference: req.reference,
                failure_reason: req.failure_reason,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": booking })))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let booking = state.booking_service.cancel(&caller, id).await?;
    Ok(Json(json!({ "success": true, "data": booking })))
}

/// POST /api/bookings/{id}/no-show (administrators)
pub async fn mark_no_show(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let booking = state.booking_service.mark_no_show(&caller, id).await?;
    Ok(Json(json!({ "success": true, "data": booking })))
}
