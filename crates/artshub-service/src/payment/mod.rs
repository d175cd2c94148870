//! Payment collaborator integrations.

pub mod gateway;

use std::sync::Arc;

use artshub_core::config::payment::PaymentConfig;
use artshub_core::error::AppError;
use artshub_core::traits::PaymentGateway;

pub use gateway::{HttpPaymentGateway, NullPaymentGateway};

/// Build the configured payment gateway.
///
/// Disabled configuration yields the null gateway, which accepts every
/// handoff without calling anyone; bookings then wait for confirmation
/// through the API.
pub fn gateway_from_config(config: &PaymentConfig) -> Result<Arc<dyn PaymentGateway>, AppError> {
    if config.enabled {
        Ok(Arc::new(HttpPaymentGateway::new(config.clone())?))
    } else {
        Ok(Arc::new(NullPaymentGateway))
    }
}
