//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// A reservation of a resource for a half-open interval `[starts_at, ends_at)`.
///
/// `requester_role`, `price_cents`, and `currency` are snapshots taken at
/// creation. Later changes to the requester's role or the resource's rates
/// never reprice an existing booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// Owning tenant organization.
    pub tenant_id: Uuid,
    /// The booked resource.
    pub resource_id: Uuid,
    /// Who requested the booking.
    pub requester_id: Uuid,
    /// Requester role at creation time.
    pub requester_role: String,
    /// Start of the booked interval (inclusive).
    pub starts_at: DateTime<Utc>,
    /// End of the booked interval (exclusive).
    pub ends_at: DateTime<Utc>,
    /// Number of participants holding capacity.
    pub participant_count: i32,
    /// Total price in minor units, computed once at creation.
    pub price_cents: i64,
    /// Currency of `price_cents`, snapshot of the resource currency.
    pub currency: String,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Provider reference recorded on successful payment confirmation.
    pub payment_reference: Option<String>,
    /// When the booking was confirmed.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// When the booking was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Who cancelled the booking. `None` for the automatic expiry sweep.
    pub cancelled_by: Option<Uuid>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Check if the booked interval has started as of `now`.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at
    }

    /// Check if the booked interval has fully elapsed as of `now`.
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.ends_at
    }

    /// Check if the booking currently holds capacity.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Data required to insert a new booking.
///
/// `status` is `Confirmed` for zero-price bookings and `Pending` otherwise;
/// the writer decides before insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// The resource to book.
    pub resource_id: Uuid,
    /// Who is booking.
    pub requester_id: Uuid,
    /// Requester role snapshot.
    pub requester_role: String,
    /// Start of the requested interval (inclusive).
    pub starts_at: DateTime<Utc>,
    /// End of the requested interval (exclusive).
    pub ends_at: DateTime<Utc>,
    /// Number of participants.
    pub participant_count: i32,
    /// Computed total price in minor units.
    pub price_cents: i64,
    /// Currency snapshot.
    pub currency: String,
    /// Initial lifecycle state.
    pub status: BookingStatus,
    /// Confirmation timestamp for instantly-confirmed free bookings.
    pub confirmed_at: Option<DateTime<Utc>>,
}
