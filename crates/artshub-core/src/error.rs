//! Unified application error types for ArtsHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The booking-domain failure kinds
//! (`SlotUnavailable`, `PaymentFailed`, ...) are first-class variants so
//! that callers can react to them without parsing messages.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The referenced bookable resource does not exist.
    ResourceNotFound,
    /// The referenced booking does not exist.
    BookingNotFound,
    /// The requested time range is malformed or outside the operating window.
    InvalidTimeRange,
    /// The participant count is outside `[1, capacity]`.
    InvalidParticipantCount,
    /// The requested interval conflicts with existing active bookings.
    SlotUnavailable,
    /// The booking is not in a state that permits the requested transition.
    InvalidTransition,
    /// The payment collaborator reported a failed payment.
    PaymentFailed,
    /// Input validation failed.
    Validation,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An external service error occurred.
    ExternalService,
    /// An internal server error occurred.
    Internal,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceNotFound => write!(f, "RESOURCE_NOT_FOUND"),
            Self::BookingNotFound => write!(f, "BOOKING_NOT_FOUND"),
            Self::InvalidTimeRange => write!(f, "INVALID_TIME_RANGE"),
            Self::InvalidParticipantCount => write!(f, "INVALID_PARTICIPANT_COUNT"),
            Self::SlotUnavailable => write!(f, "SLOT_UNAVAILABLE"),
            Self::InvalidTransition => write!(f, "INVALID_TRANSITION"),
            Self::PaymentFailed => write!(f, "PAYMENT_FAILED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The unified application error used throughout ArtsHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a resource-not-found error.
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResourceNotFound, message)
    }

    /// Create a booking-not-found error.
    pub fn booking_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BookingNotFound, message)
    }

    /// Create an invalid-time-range error.
    pub fn invalid_time_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTimeRange, message)
    }

    /// Create an invalid-participant-count error.
    pub fn invalid_participant_count(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParticipantCount, message)
    }

    /// Create a slot-unavailable error.
    pub fn slot_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SlotUnavailable, message)
    }

    /// Create an invalid-transition error.
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTransition, message)
    }

    /// Create a payment-failed error.
    pub fn payment_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PaymentFailed, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for a given error kind.
pub fn status_for(kind: &ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ResourceNotFound | ErrorKind::BookingNotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidTimeRange
        | ErrorKind::InvalidParticipantCount
        | ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::SlotUnavailable | ErrorKind::InvalidTransition | ErrorKind::Conflict => {
            StatusCode::CONFLICT
        }
        ErrorKind::PaymentFailed => StatusCode::PAYMENT_REQUIRED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::ExternalService | ErrorKind::ServiceUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self.kind);

        if status.is_server_error() {
            tracing::error!(kind = %self.kind, error = %self.message, "Internal server error");
        }

        let body = ApiErrorResponse {
            error: self.kind.to_string(),
            message: self.message.clone(),
        };

        (status, Json(body)).into_response()
    }
}
