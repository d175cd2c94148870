//! Request DTOs with validation.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create resource request body (administrators).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateResourceRequest {
    /// Resource name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Resource kind: workshop, equipment, space, or event.
    pub kind: String,
    /// Optional description.
    pub description: Option<String>,
    /// Maximum concurrent participants.
    #[validate(range(min = 1))]
    pub capacity: i32,
    /// Bookable slot granularity in minutes.
    #[validate(range(min = 5, max = 1440))]
    pub slot_minutes: i32,
    /// Daily opening time (UTC wall clock, `HH:MM:SS`).
    pub open_time: NaiveTime,
    /// Daily closing time (UTC wall clock, `HH:MM:SS`).
    pub close_time: NaiveTime,
    /// ISO weekday numbers the resource is open (1 = Monday).
    pub open_days: Vec<i16>,
    /// Dates the resource is closed regardless of weekday.
    #[serde(default)]
    pub blackout_dates: Vec<NaiveDate>,
    /// ISO 4217 currency code.
    #[validate(length(equal = 3))]
    pub currency: String,
    /// Per-participant default rate in minor units.
    #[validate(range(min = 0))]
    pub default_rate_cents: i64,
    /// Per-participant rate overrides keyed by requester role.
    #[serde(default)]
    pub pricing_rules: HashMap<String, i64>,
    /// Roles that book free of charge.
    #[serde(default)]
    pub free_for_roles: Vec<String>,
}

/// Update resource request body (administrators). Omitted fields are unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateResourceRequest {
    /// New name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New capacity.
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    /// New slot granularity in minutes.
    #[validate(range(min = 5, max = 1440))]
    pub slot_minutes: Option<i32>,
    /// New opening time.
    pub open_time: Option<NaiveTime>,
    /// New closing time.
    pub close_time: Option<NaiveTime>,
    /// New open weekdays.
    pub open_days: Option<Vec<i16>>,
    /// New blackout dates.
    pub blackout_dates: Option<Vec<NaiveDate>>,
    /// New default rate in minor units.
    #[validate(range(min = 0))]
    pub default_rate_cents: Option<i64>,
    /// New role rate overrides.
    pub pricing_rules: Option<HashMap<String, i64>>,
    /// New free-role list.
    pub free_for_roles: Option<Vec<String>>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Create booking request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Resource to book.
    pub resource_id: Uuid,
    /// Booking start (inclusive).
    pub starts_at: DateTime<Utc>,
    /// Booking end (exclusive).
    pub ends_at: DateTime<Utc>,
    /// Number of participants.
    #[validate(range(min = 1))]
    pub participant_count: i32,
}

/// Payment confirmation callback body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmPaymentRequest {
    /// Whether the payment succeeded.
    pub succeeded: bool,
    /// Provider payment reference.
    pub reference: Option<String>,
    /// Provider failure reason, when `succeeded` is false.
    pub failure_reason: Option<String>,
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// First date of the range (inclusive, `YYYY-MM-DD`).
    pub start_date: NaiveDate,
    /// Last date of the range (inclusive, `YYYY-MM-DD`).
    pub end_date: NaiveDate,
}

/// Query parameters for the quote endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteQuery {
    /// Number of participants to price.
    pub participants: i32,
    /// Role to price for; defaults to the caller's role.
    pub role: Option<String>,
}

/// Query parameters for the schedule feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleQuery {
    /// Window start (inclusive, RFC 3339).
    pub from: DateTime<Utc>,
    /// Window end (exclusive, RFC 3339).
    pub to: DateTime<Utc>,
}
