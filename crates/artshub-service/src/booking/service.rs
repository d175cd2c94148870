//! Booking writer: create, confirm, cancel, no-show, and reads.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use artshub_core::config::booking::BookingConfig;
use artshub_core::error::AppError;
use artshub_core::traits::PaymentGateway;
use artshub_core::types::{PageRequest, PageResponse};
use artshub_database::repositories::{BookingRepository, ResourceRepository};
use artshub_entity::booking::{Booking, BookingStatus, CreateBooking};

use crate::context::RequestContext;
use crate::pricing;

/// Request to create a booking.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateBookingRequest {
    /// The resource to book.
    pub resource_id: Uuid,
    /// Start of the requested interval (inclusive).
    pub starts_at: DateTime<Utc>,
    /// End of the requested interval (exclusive).
    pub ends_at: DateTime<Utc>,
    /// Number of participants.
    pub participant_count: i32,
}

/// Settlement outcome reported by the payment collaborator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PaymentOutcome {
    /// Whether the payment settled.
    pub succeeded: bool,
    /// Provider reference for a settled payment.
    pub reference: Option<String>,
    /// Provider-supplied reason for a failed payment.
    pub failure_reason: Option<String>,
}

/// Orchestrates the booking lifecycle.
///
/// All writes either pre-validate then delegate to a guarded repository
/// operation (create) or use compare-and-set status updates, so concurrent
/// requests converge instead of corrupting state.
#[derive(Clone)]
pub struct BookingService {
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Resource repository.
    resource_repo: Arc<ResourceRepository>,
    /// Payment collaborator.
    gateway: Arc<dyn PaymentGateway>,
    /// Booking policy.
    config: BookingConfig,
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService").finish()
    }
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        booking_repo: Arc<BookingRepository>,
        resource_repo: Arc<ResourceRepository>,
        gateway: Arc<dyn PaymentGateway>,
        config: BookingConfig,
    ) -> Self {
        Self {
            booking_repo,
            resource_repo,
            gateway,
            config,
        }
    }

    fn is_admin(&self, ctx: &RequestContext) -> bool {
        self.config.is_admin_role(&ctx.requester.role)
    }

    /// Creates a booking.
    ///
    /// Free bookings are inserted already confirmed. Priced bookings are
    /// inserted pending and handed to the payment collaborator; a handoff
    /// failure is logged and the booking stays pending for retry through
    /// `confirm_payment`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateBookingRequest,
    ) -> Result<Booking, AppError> {
        if req.participant_count < 1 {
            return Err(AppError::invalid_participant_count(
                "Participant count must be at least 1",
            ));
        }
        if req.ends_at <= req.starts_at {
            return Err(AppError::invalid_time_range(
                "Booking end must be after its start",
            ));
        }

        let resource = self
            .resource_repo
            .find_by_id(ctx.tenant_id, req.resource_id)
            .await?
            .filter(|r| r.active)
            .ok_or_else(|| AppError::resource_not_found("Resource not found"))?;

        if req.participant_count > resource.capacity {
            return Err(AppError::invalid_participant_count(format!(
                "Participant count {} exceeds resource capacity {}",
                req.participant_count, resource.capacity
            )));
        }
        if !resource.window_covers(req.starts_at, req.ends_at) {
            return Err(AppError::invalid_time_range(
                "Requested interval is outside the resource operating window",
            ));
        }

        let price_cents =
            pricing::compute_price(&resource, &ctx.requester.role, req.participant_count);
        let (status, confirmed_at) = if price_cents == 0 {
            (BookingStatus::Confirmed, Some(ctx.request_time))
        } else {
            (BookingStatus::Pending, None)
        };

        // The guarded insert re-checks window and capacity under the
        // resource row lock; these pre-checks only give earlier errors.
        let booking = self
            .booking_repo
            .create_guarded(
                ctx.tenant_id,
                &CreateBooking {
                    resource_id: req.resource_id,
                    requester_id: ctx.requester.id,
                    requester_role: ctx.requester.role.clone(),
                    starts_at: req.starts_at,
                    ends_at: req.ends_at,
                    participant_count: req.participant_count,
                    price_cents,
                    currency: resource.currency.clone(),
                    status,
                    confirmed_at,
                },
            )
            .await?;

        info!(
            tenant_id = %ctx.tenant_id,
            booking_id = %booking.id,
            resource_id = %booking.resource_id,
            requester_id = %booking.requester_id,
            status = %booking.status,
            price_cents = booking.price_cents,
            "Booking created"
        );

        if booking.status == BookingStatus::Pending {
            match self
                .gateway
                .request_payment(booking.id, booking.price_cents, &booking.currency)
                .await
            {
                Ok(outcome) => info!(
                    booking_id = %booking.id,
                    provider_reference = ?outcome.provider_reference,
                    "Payment requested"
                ),
                Err(e) => warn!(
                    booking_id = %booking.id,
                    error = %e,
                    "Payment handoff failed; booking stays pending"
                ),
            }
        }

        Ok(booking)
    }

    /// Applies a payment outcome to a pending booking.
    ///
    /// Calling this for a booking that already left `pending` is an
    /// idempotent no-op returning the current state, so the collaborator
    /// may safely retry its callback.
    pub async fn confirm_payment(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        outcome: PaymentOutcome,
    ) -> Result<Booking, AppError> {
        let booking = self
            .booking_repo
            .find_by_id(ctx.tenant_id, booking_id)
            .await?
            .ok_or_else(|| AppError::booking_not_found("Booking not found"))?;

        if booking.status != BookingStatus::Pending {
            return Ok(booking);
        }

        if !outcome.succeeded {
            let reason = outcome
                .failure_reason
                .unwrap_or_else(|| "no reason given".to_string());
            warn!(
                tenant_id = %ctx.tenant_id,
                booking_id = %booking_id,
                reason = %reason,
                "Payment failed; booking stays pending"
            );
            return Err(AppError::payment_failed(format!(
                "Payment failed: {reason}"
            )));
        }

        match self
            .booking_repo
            .confirm_if_pending(ctx.tenant_id, booking_id, outcome.reference.as_deref())
            .await?
        {
            Some(confirmed) => {
                info!(
                    tenant_id = %ctx.tenant_id,
                    booking_id = %booking_id,
                    "Booking confirmed"
                );
                Ok(confirmed)
            }
            // Lost the race with another confirmation or the expiry sweep;
            // return whatever state won.
            None => self
                .booking_repo
                .find_by_id(ctx.tenant_id, booking_id)
                .await?
                .ok_or_else(|| AppError::booking_not_found("Booking not found")),
        }
    }

    /// Cancels a booking.
    ///
    /// Requesters may cancel their own bookings before the interval ends.
    /// Administrators may cancel any booking at any time, including a
    /// no-show as a correction.
    pub async fn cancel(&self, ctx: &RequestContext, booking_id: Uuid) -> Result<Booking, AppError> {
        let booking = self
            .booking_repo
            .find_by_id(ctx.tenant_id, booking_id)
            .await?
            .ok_or_else(|| AppError::booking_not_found("Booking not found"))?;

        let is_admin = self.is_admin(ctx);
        if !is_admin && booking.requester_id != ctx.requester.id {
            return Err(AppError::booking_not_found("Booking not found"));
        }
        if booking.status.is_terminal() {
            return Err(AppError::invalid_transition(format!(
                "Cannot cancel a {} booking",
                booking.status
            )));
        }
        if booking.status == BookingStatus::NoShow && !is_admin {
            return Err(AppError::authorization(
                "Only an administrator can cancel a no-show booking",
            ));
        }
        if !is_admin && booking.has_ended(ctx.request_time) {
            return Err(AppError::invalid_transition(
                "Booking interval has already ended",
            ));
        }

        let cancelled = self
            .booking_repo
            .cancel(ctx.tenant_id, booking_id, Some(ctx.requester.id), is_admin)
            .await?
            .ok_or_else(|| {
                AppError::invalid_transition("Booking state changed; cancellation not applied")
            })?;

        info!(
            tenant_id = %ctx.tenant_id,
            booking_id = %booking_id,
            cancelled_by = %ctx.requester.id,
            "Booking cancelled"
        );

        Ok(cancelled)
    }

    /// Marks a confirmed booking as a no-show (administrators only).
    pub async fn mark_no_show(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> Result<Booking, AppError> {
        if !self.is_admin(ctx) {
            return Err(AppError::authorization(
                "Marking a no-show requires an administrator role",
            ));
        }

        let booking = self
            .booking_repo
            .find_by_id(ctx.tenant_id, booking_id)
            .await?
            .ok_or_else(|| AppError::booking_not_found("Booking not found"))?;

        if booking.status != BookingStatus::Confirmed {
            return Err(AppError::invalid_transition(format!(
                "Cannot mark a {} booking as no-show",
                booking.status
            )));
        }
        if !booking.has_started(ctx.request_time) {
            return Err(AppError::invalid_transition(
                "Cannot mark a no-show before the booking starts",
            ));
        }

        let marked = self
            .booking_repo
            .mark_no_show(ctx.tenant_id, booking_id)
            .await?
            .ok_or_else(|| {
                AppError::invalid_transition("Booking state changed; no-show not applied")
            })?;

        info!(
            tenant_id = %ctx.tenant_id,
            booking_id = %booking_id,
            marked_by = %ctx.requester.id,
            "Booking marked as no-show"
        );

        Ok(marked)
    }

    /// Gets a booking by ID. Requesters see only their own bookings.
    pub async fn get(&self, ctx: &RequestContext, booking_id: Uuid) -> Result<Booking, AppError> {
        let booking = self
            .booking_repo
            .find_by_id(ctx.tenant_id, booking_id)
            .await?
            .ok_or_else(|| AppError::booking_not_found("Booking not found"))?;

        if !self.is_admin(ctx) && booking.requester_id != ctx.requester.id {
            return Err(AppError::booking_not_found("Booking not found"));
        }

        Ok(booking)
    }

    /// Lists the requester's own bookings, newest first.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Booking>, AppError> {
        let items = self
            .booking_repo
            .list_for_requester(ctx.tenant_id, ctx.requester.id, &page)
            .await?;
        let total = self
            .booking_repo
            .count_for_requester(ctx.tenant_id, ctx.requester.id)
            .await?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// The calendar feed of a resource (administrators only).
    pub async fn resource_schedule(
        &self,
        ctx: &RequestContext,
        resource_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError> {
        if !self.is_admin(ctx) {
            return Err(AppError::authorization(
                "The schedule feed requires an administrator role",
            ));
        }
        if to <= from {
            return Err(AppError::invalid_time_range(
                "Schedule window end must be after its start",
            ));
        }

        self.resource_repo
            .find_by_id(ctx.tenant_id, resource_id)
            .await?
            .ok_or_else(|| AppError::resource_not_found("Resource not found"))?;

        self.booking_repo
            .list_for_resource_window(ctx.tenant_id, resource_id, from, to)
            .await
    }
}
