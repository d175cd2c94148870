//! Pending-payment expiry sweep.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing;

use artshub_core::config::booking::BookingConfig;
use artshub_core::error::AppError;
use artshub_database::repositories::booking::BookingRepository;

/// Cancels pending bookings whose payment never arrived.
///
/// A pending booking holds its slot. Without this sweep an abandoned
/// checkout would block the interval forever.
#[derive(Debug)]
pub struct PendingExpiryTask {
    /// Booking repository
    booking_repo: Arc<BookingRepository>,
    /// Booking policy settings
    config: BookingConfig,
}

impl PendingExpiryTask {
    /// Create a new pending expiry task
    pub fn new(booking_repo: Arc<BookingRepository>, config: BookingConfig) -> Self {
        Self {
            booking_repo,
            config,
        }
    }

    /// Run one sweep. Returns the number of bookings cancelled.
    ///
    /// The underlying update is a single conditional statement, so
    /// concurrent sweeps and concurrent payment confirmations race
    /// safely: a booking confirmed between cutoff computation and the
    /// update is no longer `pending` and is left untouched.
    pub async fn run(&self) -> Result<u64, AppError> {
        if !self.config.auto_cancel_pending {
            tracing::debug!("Pending expiry sweep disabled by configuration");
            return Ok(0);
        }

        let cutoff = Utc::now() - Duration::minutes(self.config.pending_timeout_minutes);
        let cancelled = self.booking_repo.cancel_stale_pending(cutoff).await?;

        if cancelled > 0 {
            tracing::info!(
                "Pending expiry sweep cancelled {} booking(s) older than {} minutes",
                cancelled,
                self.config.pending_timeout_minutes
            );
        }

        Ok(cancelled)
    }
}
