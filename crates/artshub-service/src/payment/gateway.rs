//! Payment gateway implementations.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use artshub_core::config::payment::PaymentConfig;
use artshub_core::error::{AppError, ErrorKind};
use artshub_core::result::AppResult;
use artshub_core::traits::{PaymentGateway, PaymentRequestOutcome};

/// Response body of the collaborator's payment-request endpoint.
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    /// Reference assigned by the provider, if any.
    #[serde(default)]
    reference: Option<String>,
}

/// Gateway that POSTs payment requests to the configured processor.
///
/// The processor reports settlement asynchronously through the public
/// confirm-payment operation; this gateway only initiates collection.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    config: PaymentConfig,
}

impl HttpPaymentGateway {
    /// Create a gateway from configuration.
    pub fn new(config: PaymentConfig) -> Result<Self, AppError> {
        if config.endpoint_url.trim().is_empty() {
            return Err(AppError::configuration(
                "Payment endpoint URL is not configured",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to build payment HTTP client",
                    e,
                )
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn request_payment(
        &self,
        booking_id: Uuid,
        amount_cents: i64,
        currency: &str,
    ) -> AppResult<PaymentRequestOutcome> {
        let url = format!(
            "{}/payment-requests",
            self.config.endpoint_url.trim_end_matches('/')
        );

        let mut request = self.client.post(&url).json(&serde_json::json!({
            "booking_id": booking_id,
            "amount_cents": amount_cents,
            "currency": currency,
        }));
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Payment collaborator is unreachable",
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Payment collaborator returned HTTP {status}"
            )));
        }

        let body: ProviderResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Payment collaborator returned an unreadable body",
                e,
            )
        })?;

        Ok(PaymentRequestOutcome {
            provider_reference: body.reference,
        })
    }
}

/// Gateway used when outbound payment is disabled.
///
/// Accepts every handoff without calling anyone. Pending bookings then
/// wait for a confirm-payment call, which is how development setups and
/// invoice-later tenants operate.
#[derive(Debug, Clone, Default)]
pub struct NullPaymentGateway;

#[async_trait]
impl PaymentGateway for NullPaymentGateway {
    async fn request_payment(
        &self,
        booking_id: Uuid,
        amount_cents: i64,
        currency: &str,
    ) -> AppResult<PaymentRequestOutcome> {
        debug!(
            booking_id = %booking_id,
            amount_cents,
            currency = %currency,
            "Payment gateway disabled; skipping handoff"
        );
        Ok(PaymentRequestOutcome {
            provider_reference: None,
        })
    }
}
