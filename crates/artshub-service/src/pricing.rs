//! Role-tier pricing resolution.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use artshub_core::error::AppError;
use artshub_database::repositories::ResourceRepository;
use artshub_entity::resource::Resource;

use crate::context::RequestContext;

/// A priced booking request before submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Total amount in minor units.
    pub amount_cents: i64,
    /// Currency of the amount.
    pub currency: String,
    /// Per-participant rate applied.
    pub unit_rate_cents: i64,
    /// Number of participants quoted.
    pub participant_count: i32,
    /// Role the rate was resolved for.
    pub role: String,
}

/// Total price in minor units for a role booking `participant_count` seats.
///
/// Deterministic in its inputs. The booking writer calls this exactly once
/// at creation; the result is snapshot into the booking row.
pub fn compute_price(resource: &Resource, role: &str, participant_count: i32) -> i64 {
    resource.unit_rate_for(role) * i64::from(participant_count)
}

/// Serves price quotes for the booking form.
#[derive(Debug, Clone)]
pub struct PricingService {
    /// Resource repository.
    resource_repo: Arc<ResourceRepository>,
}

impl PricingService {
    /// Creates a new pricing service.
    pub fn new(resource_repo: Arc<ResourceRepository>) -> Self {
        Self { resource_repo }
    }

    /// Quote a booking before submission.
    ///
    /// `role` defaults to the requester's own role; passing another role is
    /// allowed so staff can quote on behalf of walk-ins.
    pub async fn quote(
        &self,
        ctx: &RequestContext,
        resource_id: Uuid,
        participant_count: i32,
        role: Option<&str>,
    ) -> Result<Quote, AppError> {
        if participant_count < 1 {
            return Err(AppError::invalid_participant_count(
                "Participant count must be at least 1",
            ));
        }

        let resource = self
            .resource_repo
            .find_by_id(ctx.tenant_id, resource_id)
            .await?
            .filter(|r| r.active)
            .ok_or_else(|| AppError::resource_not_found("Resource not found"))?;

        if participant_count > resource.capacity {
            return Err(AppError::invalid_participant_count(format!(
                "Participant count {} exceeds resource capacity {}",
                participant_count, resource.capacity
            )));
        }

        let role = role.unwrap_or(&ctx.requester.role);
        let unit_rate_cents = resource.unit_rate_for(role);

        Ok(Quote {
            amount_cents: unit_rate_cents * i64::from(participant_count),
            currency: resource.currency.clone(),
            unit_rate_cents,
            participant_count,
            role: role.to_string(),
        })
    }
}
