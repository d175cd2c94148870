//! Resource catalog administration and browsing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveTime;
use tracing::info;
use uuid::Uuid;

use artshub_core::config::booking::BookingConfig;
use artshub_core::error::AppError;
use artshub_core::types::{PageRequest, PageResponse};
use artshub_database::repositories::ResourceRepository;
use artshub_entity::resource::{CreateResource, Resource, UpdateResource};

use crate::context::RequestContext;

/// Manages the tenant resource catalog.
///
/// Catalog writes are restricted to administrator roles. Reads are open to
/// every requester of the tenant; the catalog is the browsable surface of
/// the booking system.
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// Resource repository.
    resource_repo: Arc<ResourceRepository>,
    /// Booking policy, used for admin role detection.
    config: BookingConfig,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(resource_repo: Arc<ResourceRepository>, config: BookingConfig) -> Self {
        Self {
            resource_repo,
            config,
        }
    }

    fn require_admin(&self, ctx: &RequestContext) -> Result<(), AppError> {
        if self.config.is_admin_role(&ctx.requester.role) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Catalog management requires an administrator role",
            ))
        }
    }

    /// Creates a new resource.
    pub async fn create_resource(
        &self,
        ctx: &RequestContext,
        mut data: CreateResource,
    ) -> Result<Resource, AppError> {
        self.require_admin(ctx)?;

        data.currency = data.currency.to_uppercase();
        validate_catalog_entry(
            &data.name,
            data.capacity,
            data.slot_minutes,
            data.open_time,
            data.close_time,
            &data.open_days,
            &data.currency,
            data.default_rate_cents,
            &data.pricing_rules,
        )?;

        let resource = self.resource_repo.create(ctx.tenant_id, &data).await?;

        info!(
            tenant_id = %ctx.tenant_id,
            resource_id = %resource.id,
            name = %resource.name,
            "Resource created"
        );

        Ok(resource)
    }

    /// Updates an existing resource. `None` fields are unchanged.
    pub async fn update_resource(
        &self,
        ctx: &RequestContext,
        resource_id: Uuid,
        data: UpdateResource,
    ) -> Result<Resource, AppError> {
        self.require_admin(ctx)?;

        let existing = self
            .resource_repo
            .find_by_id(ctx.tenant_id, resource_id)
            .await?
            .ok_or_else(|| AppError::resource_not_found("Resource not found"))?;

        // Validate the merged state, not just the changed fields.
        validate_catalog_entry(
            data.name.as_deref().unwrap_or(&existing.name),
            data.capacity.unwrap_or(existing.capacity),
            data.slot_minutes.unwrap_or(existing.slot_minutes),
            data.open_time.unwrap_or(existing.open_time),
            data.close_time.unwrap_or(existing.close_time),
            data.open_days.as_deref().unwrap_or(&existing.open_days),
            &existing.currency,
            data.default_rate_cents.unwrap_or(existing.default_rate_cents),
            data.pricing_rules.as_ref().unwrap_or(&existing.pricing_rules.0),
        )?;

        let resource = self
            .resource_repo
            .update(ctx.tenant_id, resource_id, &data)
            .await?
            .ok_or_else(|| AppError::resource_not_found("Resource not found"))?;

        info!(
            tenant_id = %ctx.tenant_id,
            resource_id = %resource.id,
            "Resource updated"
        );

        Ok(resource)
    }

    /// Gets a resource by ID.
    pub async fn get_resource(
        &self,
        ctx: &RequestContext,
        resource_id: Uuid,
    ) -> Result<Resource, AppError> {
        self.resource_repo
            .find_by_id(ctx.tenant_id, resource_id)
            .await?
            .ok_or_else(|| AppError::resource_not_found("Resource not found"))
    }

    /// Lists the tenant catalog, name-ordered.
    pub async fn list_resources(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Resource>, AppError> {
        let items = self.resource_repo.list(ctx.tenant_id, &page).await?;
        let total = self.resource_repo.count(ctx.tenant_id).await?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}

/// Validate a complete catalog entry.
#[allow(clippy::too_many_arguments)]
fn validate_catalog_entry(
    name: &str,
    capacity: i32,
    slot_minutes: i32,
    open_time: NaiveTime,
    close_time: NaiveTime,
    open_days: &[i16],
    currency: &str,
    default_rate_cents: i64,
    pricing_rules: &HashMap<String, i64>,
) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Resource name cannot be empty"));
    }
    if capacity < 1 {
        return Err(AppError::validation("Capacity must be at least 1"));
    }
    if !(5..=1440).contains(&slot_minutes) {
        return Err(AppError::validation(
            "Slot granularity must be between 5 and 1440 minutes",
        ));
    }
    if open_time > close_time {
        return Err(AppError::validation(
            "Opening time must not be after closing time",
        ));
    }
    if open_days.iter().any(|d| !(1..=7).contains(d)) {
        return Err(AppError::validation(
            "Open days must be ISO weekday numbers (1 = Monday .. 7 = Sunday)",
        ));
    }
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(AppError::validation(
            "Currency must be a 3-letter ISO 4217 code",
        ));
    }
    if default_rate_cents < 0 {
        return Err(AppError::validation("Default rate cannot be negative"));
    }
    if pricing_rules.values().any(|rate| *rate < 0) {
        return Err(AppError::validation("Role rates cannot be negative"));
    }
    Ok(())
}
