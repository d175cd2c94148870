//! Completion sweep for elapsed bookings.

use std::sync::Arc;

use chrono::Utc;
use tracing;

use artshub_core::error::AppError;
use artshub_database::repositories::booking::BookingRepository;

/// Transitions confirmed bookings whose end has elapsed to `completed`.
#[derive(Debug)]
pub struct CompletionSweepTask {
    /// Booking repository
    booking_repo: Arc<BookingRepository>,
}

impl CompletionSweepTask {
    /// Create a new completion sweep task
    pub fn new(booking_repo: Arc<BookingRepository>) -> Self {
        Self { booking_repo }
    }

    /// Run one sweep. Returns the number of bookings completed.
    pub async fn run(&self) -> Result<u64, AppError> {
        let completed = self.booking_repo.complete_elapsed(Utc::now()).await?;

        if completed > 0 {
            tracing::info!("Completion sweep marked {} booking(s) completed", completed);
        }

        Ok(completed)
    }
}
