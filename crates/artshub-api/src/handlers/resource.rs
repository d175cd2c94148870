//! Catalog, availability, quote, and schedule handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use artshub_core::error::AppError;
use artshub_entity::resource::{CreateResource, ResourceKind, UpdateResource};

use crate::dto::request::{
    AvailabilityQuery, CreateResourceRequest, QuoteQuery, ScheduleQuery, UpdateResourceRequest,
};
use crate::extractors::{Caller, PaginationParams};
use crate::state::AppState;

/// GET /api/resources
pub async fn list_resources(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let page = state
        .catalog_service
        .list_resources(&caller, params.into_page_request())
        .await?;

    Ok(Json(json!({ "success": true, "data": page })))
}

/// POST /api/resources
pub async fn create_resource(
    State(state): State<AppState>,
    caller: Caller,
    Json(req): Json<CreateResourceRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let kind = ResourceKind::from_str(&req.kind)?;
    let resource = state
        .catalog_service
        .create_resource(
            &caller,
            CreateResource {
                name: req.name,
                kind,
                description: req.description,
                capacity: req.capacity,
                slot_minutes: req.slot_minutes,
                open_time: req.open_time,
                close_time: req.close_time,
                open_days: req.open_days,
                blackout_dates: req.blackout_dates,
                currency: req.currency,
                default_rate_cents: req.default_rate_cents,
                pricing_rules: req.pricing_rules,
                free_for_roles: req.free_for_roles,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": resource })))
}

/// GET /api/resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let resource = state.catalog_service.get_resource(&caller, id).await?;
    Ok(Json(json!({ "success": true, "data": resource })))
}

/// PUT /api/resources/{id}
pub async fn update_resource(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResourceRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let resource = state
        .catalog_service
        .update_resource(
            &caller,
            id,
            UpdateResource {
                name: req.name,
                description: req.description,
                capacity: req.capacity,
                slot_minutes: req.slot_minutes,
                open_time: req.open_time,
                close_time: req.close_time,
                open_days: req.open_days,
                blackout_dates: req.blackout_dates,
                default_rate_cents: req.default_rate_cents,
                pricing_rules: req.pricing_rules,
                free_for_roles: req.free_for_roles,
                active: req.active,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": resource })))
}

/// GET /api/resources/{id}/availability?start_date&end_date
pub async fn availability(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let slots = state
        .availability_service
        .get_available_slots(&caller, id, params.start_date, params.end_date)
        .await?;

    Ok(Json(json!({ "success": true, "data": slots })))
}

/// GET /api/resources/{id}/quote?participants[&role]
pub async fn quote(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Query(params): Query<QuoteQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let quote = state
        .pricing_service
        .quote(&caller, id, params.participants, params.role.as_deref())
        .await?;

    Ok(Json(json!({ "success": true, "data": quote })))
}

/// GET /api/resources/{id}/schedule?from&to (administrators)
pub async fn schedule(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Query(params): Query<ScheduleQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let bookings = state
        .booking_service
        .resource_schedule(&caller, id, params.from, params.to)
        .await?;

    Ok(Json(json!({ "success": true, "data": bookings })))
}
