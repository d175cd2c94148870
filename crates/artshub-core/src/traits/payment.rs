//! Payment gateway trait for the external payment collaborator.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Result of handing a booking off to the payment collaborator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PaymentRequestOutcome {
    /// Reference assigned by the payment provider, if any.
    pub provider_reference: Option<String>,
}

/// Trait for requesting payment collection on a pending booking.
///
/// The gateway only initiates collection. Settlement is reported back
/// asynchronously through the confirm-payment operation, so a successful
/// hand-off never changes booking state by itself.
#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Ask the collaborator to collect `amount_cents` for the booking.
    async fn request_payment(
        &self,
        booking_id: Uuid,
        amount_cents: i64,
        currency: &str,
    ) -> AppResult<PaymentRequestOutcome>;
}
