//! Availability resolution over the booking ledger.
//!
//! Availability is always recomputed from resource policy plus the live
//! set of capacity-holding bookings. There is no availability table to
//! drift out of sync; a cancellation frees its slot on the next read.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use artshub_core::config::booking::BookingConfig;
use artshub_core::error::AppError;
use artshub_database::repositories::BookingRepository;
use artshub_database::repositories::ResourceRepository;
use artshub_entity::booking::overlap::{self, BookedInterval};
use artshub_entity::resource::Resource;

use crate::context::RequestContext;

/// A bookable slot with remaining capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlot {
    /// Start of the slot (inclusive).
    pub starts_at: DateTime<Utc>,
    /// End of the slot (exclusive).
    pub ends_at: DateTime<Utc>,
    /// Capacity left after subtracting intersecting active bookings.
    pub remaining_capacity: i32,
}

/// Resolves open slots for a resource over a date range.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    /// Resource repository.
    resource_repo: Arc<ResourceRepository>,
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Booking policy, bounds the queryable range.
    config: BookingConfig,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(
        resource_repo: Arc<ResourceRepository>,
        booking_repo: Arc<BookingRepository>,
        config: BookingConfig,
    ) -> Self {
        Self {
            resource_repo,
            booking_repo,
            config,
        }
    }

    /// List open slots for a resource between two dates, inclusive.
    ///
    /// A fully-booked range yields an empty, successful list. This is a
    /// pure read: it takes no locks and can race with concurrent writers,
    /// which is fine because the create path re-validates under a lock.
    pub async fn get_available_slots(
        &self,
        ctx: &RequestContext,
        resource_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<AvailableSlot>, AppError> {
        if start_date > end_date {
            return Err(AppError::invalid_time_range(
                "Start date must not be after end date",
            ));
        }
        let span_days = (end_date - start_date).num_days() + 1;
        if span_days > self.config.max_availability_days {
            return Err(AppError::validation(format!(
                "Date range spans {} days, the maximum is {}",
                span_days, self.config.max_availability_days
            )));
        }

        let resource = self
            .resource_repo
            .find_by_id(ctx.tenant_id, resource_id)
            .await?
            .filter(|r| r.active)
            .ok_or_else(|| AppError::resource_not_found("Resource not found"))?;

        // One ledger query for the whole range; slot arithmetic is in memory.
        let from = start_date.and_time(NaiveTime::MIN).and_utc();
        let until = end_date
            .succ_opt()
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let booked = self
            .booking_repo
            .active_intervals(ctx.tenant_id, resource_id, from, until)
            .await?;

        Ok(collect_available(&resource, start_date, end_date, &booked))
    }
}

/// Tile one date's operating window into `slot_minutes` slots.
///
/// A trailing partial slot is dropped. Closed days yield nothing.
pub fn slots_for_date(resource: &Resource, date: NaiveDate) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    if resource.slot_minutes <= 0 {
        return Vec::new();
    }
    let Some((opens, closes)) = resource.operating_window(date) else {
        return Vec::new();
    };
    let step = Duration::minutes(i64::from(resource.slot_minutes));
    let mut slots = Vec::new();
    let mut cursor = opens;
    while let Some(next) = cursor.checked_add_signed(step) {
        if next > closes {
            break;
        }
        slots.push((cursor, next));
        cursor = next;
    }
    slots
}

/// Compute the open slots of a date range against a set of booked intervals.
///
/// For each candidate slot, the load is the participant sum over every
/// intersecting active booking; slots with capacity left over are returned.
fn collect_available(
    resource: &Resource,
    start_date: NaiveDate,
    end_date: NaiveDate,
    booked: &[BookedInterval],
) -> Vec<AvailableSlot> {
    let mut available = Vec::new();
    for date in start_date.iter_days().take_while(|d| *d <= end_date) {
        for (starts_at, ends_at) in slots_for_date(resource, date) {
            let taken = overlap::overlapping_participants(booked, starts_at, ends_at);
            let remaining = i64::from(resource.capacity) - taken;
            if remaining > 0 {
                available.push(AvailableSlot {
                    starts_at,
                    ends_at,
                    remaining_capacity: remaining as i32,
                });
            }
        }
    }
    available
}
