//! Booking repository implementation.
//!
//! The create path runs inside a transaction holding a `FOR UPDATE` lock
//! on the resource row, which serializes all writers of one resource while
//! leaving other resources untouched. Status changes are compare-and-set
//! updates so a lost race surfaces as zero rows instead of a bad write.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use artshub_core::error::{AppError, ErrorKind};
use artshub_core::result::AppResult;
use artshub_core::types::PageRequest;
use artshub_entity::booking::overlap::{self, BookedInterval};
use artshub_entity::booking::{Booking, CreateBooking};
use artshub_entity::resource::Resource;

/// Repository for booking records.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by ID within a tenant.
    pub async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// List a requester's bookings, newest first.
    pub async fn list_for_requester(
        &self,
        tenant_id: Uuid,
        requester_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE tenant_id = $1 AND requester_id = $2 \
             ORDER BY starts_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(tenant_id)
        .bind(requester_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))
    }

    /// List a tenant's most recently created bookings.
    pub async fn list_recent(&self, tenant_id: Uuid, limit: i64) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE tenant_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list recent bookings", e)
        })
    }

    /// Count a requester's bookings.
    pub async fn count_for_requester(&self, tenant_id: Uuid, requester_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings WHERE tenant_id = $1 AND requester_id = $2",
        )
        .bind(tenant_id)
        .bind(requester_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;
        Ok(count as u64)
    }

    /// List the calendar feed of a resource for a window, start-ordered.
    ///
    /// Includes capacity-holding and completed bookings. Cancellations and
    /// no-shows are omitted; they do not appear on the schedule.
    pub async fn list_for_resource_window(
        &self,
        tenant_id: Uuid,
        resource_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE tenant_id = $1 AND resource_id = $2 \
               AND status IN ('pending', 'confirmed', 'completed') \
               AND starts_at < $4 AND ends_at > $3 \
             ORDER BY starts_at ASC",
        )
        .bind(tenant_id)
        .bind(resource_id)
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list resource bookings", e)
        })
    }

    /// Load the capacity-holding intervals of a resource intersecting a window.
    ///
    /// Used by the availability read path. Runs outside any lock, so the
    /// result can be stale; the create path re-checks under the lock.
    pub async fn active_intervals(
        &self,
        tenant_id: Uuid,
        resource_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<Vec<BookedInterval>> {
        sqlx::query_as::<_, BookedInterval>(
            "SELECT starts_at, ends_at, participant_count FROM bookings \
             WHERE tenant_id = $1 AND resource_id = $2 \
               AND status IN ('pending', 'confirmed') \
               AND starts_at < $4 AND ends_at > $3",
        )
        .bind(tenant_id)
        .bind(resource_id)
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load booked intervals", e)
        })
    }

    /// Insert a booking after re-validating capacity under a resource lock.
    ///
    /// Locks the resource row `FOR UPDATE`, re-checks the operating window,
    /// the participant bound, and the peak concurrency of intersecting
    /// active bookings, then inserts. The checks and the insert commit or
    /// roll back as one unit.
    pub async fn create_guarded(&self, tenant_id: Uuid, data: &CreateBooking) -> AppResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        let resource = sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources WHERE id = $1 AND tenant_id = $2 FOR UPDATE",
        )
        .bind(data.resource_id)
        .bind(tenant_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock resource", e))?
        .ok_or_else(|| AppError::resource_not_found("Resource not found"))?;

        if !resource.active {
            return Err(AppError::resource_not_found("Resource not found"));
        }
        if data.participant_count > resource.capacity {
            return Err(AppError::invalid_participant_count(format!(
                "Participant count {} exceeds resource capacity {}",
                data.participant_count, resource.capacity
            )));
        }
        if !resource.window_covers(data.starts_at, data.ends_at) {
            return Err(AppError::invalid_time_range(
                "Requested interval is outside the resource operating window",
            ));
        }

        let existing = sqlx::query_as::<_, BookedInterval>(
            "SELECT starts_at, ends_at, participant_count FROM bookings \
             WHERE tenant_id = $1 AND resource_id = $2 \
               AND status IN ('pending', 'confirmed') \
               AND starts_at < $4 AND ends_at > $3",
        )
        .bind(tenant_id)
        .bind(data.resource_id)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load booked intervals", e)
        })?;

        let peak = overlap::peak_concurrency(&existing, data.starts_at, data.ends_at);
        if peak + i64::from(data.participant_count) > i64::from(resource.capacity) {
            return Err(AppError::slot_unavailable(
                "Requested interval conflicts with existing bookings",
            ));
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (tenant_id, resource_id, requester_id, requester_role, \
              starts_at, ends_at, participant_count, price_cents, currency, status, confirmed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(tenant_id)
        .bind(data.resource_id)
        .bind(data.requester_id)
        .bind(&data.requester_role)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(data.participant_count)
        .bind(data.price_cents)
        .bind(&data.currency)
        .bind(data.status)
        .bind(data.confirmed_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert booking", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit booking", e))?;

        Ok(booking)
    }

    /// Confirm a booking if it is still pending.
    ///
    /// Returns `None` when the booking is missing or no longer pending;
    /// the caller decides whether that is idempotent success or an error.
    pub async fn confirm_if_pending(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        payment_reference: Option<&str>,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'confirmed', confirmed_at = NOW(), \
                payment_reference = $3, updated_at = NOW() \
             WHERE id = $1 AND tenant_id = $2 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(tenant_id)
        .bind(payment_reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to confirm booking", e))
    }

    /// Cancel a booking if its status still permits cancellation.
    ///
    /// `cancelled_by` is `None` for the automatic expiry sweep. With
    /// `allow_no_show`, staff may also cancel a no-show as a correction.
    pub async fn cancel(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        cancelled_by: Option<Uuid>,
        allow_no_show: bool,
    ) -> AppResult<Option<Booking>> {
        let sql = if allow_no_show {
            "UPDATE bookings SET status = 'cancelled', cancelled_at = NOW(), \
                cancelled_by = $3, updated_at = NOW() \
             WHERE id = $1 AND tenant_id = $2 \
               AND status IN ('pending', 'confirmed', 'no_show') RETURNING *"
        } else {
            "UPDATE bookings SET status = 'cancelled', cancelled_at = NOW(), \
                cancelled_by = $3, updated_at = NOW() \
             WHERE id = $1 AND tenant_id = $2 \
               AND status IN ('pending', 'confirmed') RETURNING *"
        };
        sqlx::query_as::<_, Booking>(sql)
            .bind(id)
            .bind(tenant_id)
            .bind(cancelled_by)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel booking", e))
    }

    /// Mark a confirmed booking as a no-show.
    pub async fn mark_no_show(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'no_show', updated_at = NOW() \
             WHERE id = $1 AND tenant_id = $2 AND status = 'confirmed' RETURNING *",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark no-show", e))
    }

    /// Complete every confirmed booking whose interval has elapsed.
    ///
    /// Runs across all tenants; returns the number of completed bookings.
    pub async fn complete_elapsed(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'completed', updated_at = NOW() \
             WHERE status = 'confirmed' AND ends_at <= $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to complete elapsed bookings", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Cancel every pending booking created before the cutoff.
    ///
    /// Runs across all tenants; `cancelled_by` stays NULL to mark the
    /// cancellation as automatic. Returns the number of cancelled bookings.
    pub async fn cancel_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'cancelled', cancelled_at = NOW(), updated_at = NOW() \
             WHERE status = 'pending' AND created_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cancel stale bookings", e)
        })?;
        Ok(result.rows_affected())
    }
}
