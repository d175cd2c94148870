//! Bookable resource entity model.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::kind::ResourceKind;

/// A bookable resource owned by a tenant organization.
///
/// The operating window (`open_time`..`close_time` on `open_days`) and the
/// pricing columns are snapshots of tenant policy. They are read at quote
/// and booking time, so edits only affect future bookings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: Uuid,
    /// Owning tenant organization.
    pub tenant_id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Resource classification.
    pub kind: ResourceKind,
    /// Optional description for catalog listings.
    pub description: Option<String>,
    /// Maximum concurrent participants across overlapping bookings.
    pub capacity: i32,
    /// Granularity of bookable slots in minutes.
    pub slot_minutes: i32,
    /// Daily opening time (UTC wall clock).
    pub open_time: NaiveTime,
    /// Daily closing time (UTC wall clock).
    pub close_time: NaiveTime,
    /// ISO weekday numbers the resource is open (Monday = 1 .. Sunday = 7).
    pub open_days: Vec<i16>,
    /// Dates the resource is closed regardless of weekday.
    pub blackout_dates: Vec<NaiveDate>,
    /// ISO 4217 currency code for all rates on this resource.
    pub currency: String,
    /// Per-participant rate in minor units when no role rule matches.
    pub default_rate_cents: i64,
    /// Per-participant rate overrides keyed by requester role.
    pub pricing_rules: Json<HashMap<String, i64>>,
    /// Roles that book this resource free of charge.
    pub free_for_roles: Vec<String>,
    /// Whether the resource accepts new bookings.
    pub active: bool,
    /// When the resource was created.
    pub created_at: DateTime<Utc>,
    /// When the resource was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Check whether the given role books this resource for free.
    pub fn is_free_for(&self, role: &str) -> bool {
        self.free_for_roles.iter().any(|r| r == role)
    }

    /// Per-participant rate in minor units for the given role.
    ///
    /// Free roles always rate at zero. Otherwise the role-specific rule
    /// applies, falling back to the default rate.
    pub fn unit_rate_for(&self, role: &str) -> i64 {
        if self.is_free_for(role) {
            return 0;
        }
        self.pricing_rules
            .get(role)
            .copied()
            .unwrap_or(self.default_rate_cents)
    }

    /// Check whether the resource is open at all on the given date.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday().number_from_monday() as i16;
        self.open_days.contains(&weekday) && !self.blackout_dates.contains(&date)
    }

    /// The bookable window for the given date, if the resource is open.
    ///
    /// Returns `None` on closed days and when `open_time >= close_time`
    /// (a degenerate window means the resource never opens).
    pub fn operating_window(&self, date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if !self.is_open_on(date) || self.open_time >= self.close_time {
            return None;
        }
        let opens = date.and_time(self.open_time).and_utc();
        let closes = date.and_time(self.close_time).and_utc();
        Some((opens, closes))
    }

    /// Check whether `[starts_at, ends_at)` fits inside the operating
    /// window of its start date. Intervals crossing midnight never fit.
    pub fn window_covers(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        match self.operating_window(starts_at.date_naive()) {
            Some((opens, closes)) => starts_at >= opens && ends_at <= closes,
            None => false,
        }
    }
}

/// Data required to create a new resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResource {
    /// Human-readable name.
    pub name: String,
    /// Resource classification.
    pub kind: ResourceKind,
    /// Optional description.
    pub description: Option<String>,
    /// Maximum concurrent participants.
    pub capacity: i32,
    /// Granularity of bookable slots in minutes.
    pub slot_minutes: i32,
    /// Daily opening time (UTC wall clock).
    pub open_time: NaiveTime,
    /// Daily closing time (UTC wall clock).
    pub close_time: NaiveTime,
    /// ISO weekday numbers the resource is open.
    pub open_days: Vec<i16>,
    /// Dates the resource is closed regardless of weekday.
    pub blackout_dates: Vec<NaiveDate>,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Per-participant default rate in minor units.
    pub default_rate_cents: i64,
    /// Per-participant rate overrides keyed by requester role.
    pub pricing_rules: HashMap<String, i64>,
    /// Roles that book this resource free of charge.
    pub free_for_roles: Vec<String>,
}

/// Data for updating an existing resource. `None` fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateResource {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New slot granularity in minutes.
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
    pub default_rate_cents: Option<i64>,
    /// New role rate overrides.
    pub pricing_rules: Option<HashMap<String, i64>>,
    /// New free-role list.
    pub free_for_roles: Option<Vec<String>>,
    /// New active flag.
    pub active: Option<bool>,
}
