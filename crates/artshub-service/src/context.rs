//! Request context carrying the tenant and requester identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity acting in a request, as asserted by the fronting gateway.
///
/// The role is an opaque string. It is matched against pricing rules and
/// the configured admin roles but never interpreted beyond that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    /// Stable identifier of the person or system acting.
    pub id: Uuid,
    /// Role name at request time.
    pub role: String,
}

/// Context for the current request.
///
/// Built once at the HTTP boundary by an extractor and passed into every
/// service method, so each operation knows *which tenant* it works in and
/// *who* is acting. There is no ambient identity anywhere below this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The tenant organization all queries are scoped to.
    pub tenant_id: Uuid,
    /// Who is acting.
    pub requester: Requester,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(tenant_id: Uuid, requester_id: Uuid, role: impl Into<String>) -> Self {
        Self {
            tenant_id,
            requester: Requester {
                id: requester_id,
                role: role.into(),
            },
            request_time: Utc::now(),
        }
    }
}
