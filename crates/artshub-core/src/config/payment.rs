//! Payment collaborator configuration.

use serde::{Deserialize, Serialize};

/// Payment gateway configuration.
///
/// When disabled, payment requests are short-circuited and bookings stay
/// `pending` until payment is confirmed through the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Whether the outbound payment gateway is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of the payment collaborator.
    #[serde(default)]
    pub endpoint_url: String,
    /// API key sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint_url: String::new(),
            api_key: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}
