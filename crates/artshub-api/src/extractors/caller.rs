//! `Caller` extractor: builds the request context from gateway headers.
//!
//! The fronting identity gateway authenticates every request and stamps
//! `X-Tenant-Id`, `X-Requester-Id`, and `X-Requester-Role` before the
//! request reaches this service. The extractor validates the shape of
//! those headers and never re-queries identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use artshub_core::error::AppError;
use artshub_service::context::RequestContext;

/// Extracted caller context available in handlers.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

impl Caller {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for Caller {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id = uuid_header(parts, "X-Tenant-Id")?;
        let requester_id = uuid_header(parts, "X-Requester-Id")?;

        let role = parts
            .headers
            .get("X-Requester-Role")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::authorization("Missing X-Requester-Role header"))?;

        Ok(Caller(RequestContext::new(tenant_id, requester_id, role)))
    }
}

fn uuid_header(parts: &Parts, name: &str) -> Result<Uuid, AppError> {
    let value = parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authorization(format!("Missing {name} header")))?;

    value
        .parse::<Uuid>()
        .map_err(|_| AppError::validation(format!("Header {name} must be a UUID")))
}
