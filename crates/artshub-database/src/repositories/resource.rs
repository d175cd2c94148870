//! Resource catalog repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use artshub_core::error::{AppError, ErrorKind};
use artshub_core::result::AppResult;
use artshub_core::types::PageRequest;
use artshub_entity::resource::{CreateResource, Resource, UpdateResource};

/// Repository for the tenant resource catalog.
///
/// Every query is tenant-scoped. A resource belonging to a different
/// tenant is indistinguishable from a missing one.
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    /// Create a new resource repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a resource by ID within a tenant.
    pub async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find resource", e))
    }

    /// List resources for a tenant, name-ordered.
    pub async fn list(&self, tenant_id: Uuid, page: &PageRequest) -> AppResult<Vec<Resource>> {
        sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources WHERE tenant_id = $1 ORDER BY name ASC LIMIT $2 OFFSET $3",
        )
        .bind(tenant_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list resources", e))
    }

    /// Count all resources for a tenant.
    pub async fn count(&self, tenant_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resources WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count resources", e)
            })?;
        Ok(count as u64)
    }

    /// Create a resource within a tenant.
    pub async fn create(&self, tenant_id: Uuid, data: &CreateResource) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "INSERT INTO resources (tenant_id, name, kind, description, capacity, slot_minutes, \
              open_time, close_time, open_days, blackout_dates, currency, default_rate_cents, \
              pricing_rules, free_for_roles) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) RETURNING *",
        )
        .bind(tenant_id)
        .bind(&data.name)
        .bind(data.kind)
        .bind(&data.description)
        .bind(data.capacity)
        .bind(data.slot_minutes)
        .bind(data.open_time)
        .bind(data.close_time)
        .bind(&data.open_days)
        .bind(&data.blackout_dates)
        .bind(&data.currency)
        .bind(data.default_rate_cents)
        .bind(Json(&data.pricing_rules))
        .bind(&data.free_for_roles)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create resource", e))
    }

    /// Update a resource within a tenant. `None` fields keep their value.
    ///
    /// Returns the updated row, or `None` when the resource does not exist
    /// in the tenant.
    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: &UpdateResource,
    ) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, Resource>(
            "UPDATE resources SET \
                name = COALESCE($3, name), \
                description = COALESCE($4, description), \
                capacity = COALESCE($5, capacity), \
                slot_minutes = COALESCE($6, slot_minutes), \
                open_time = COALESCE($7, open_time), \
                close_time = COALESCE($8, close_time), \
                open_days = COALESCE($9, open_days), \
                blackout_dates = COALESCE($10, blackout_dates), \
                default_rate_cents = COALESCE($11, default_rate_cents), \
                pricing_rules = COALESCE($12, pricing_rules), \
                free_for_roles = COALESCE($13, free_for_roles), \
                active = COALESCE($14, active), \
                updated_at = NOW() \
             WHERE id = $1 AND tenant_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(tenant_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.capacity)
        .bind(data.slot_minutes)
        .bind(data.open_time)
        .bind(data.close_time)
        .bind(data.open_days.clone())
        .bind(data.blackout_dates.clone())
        .bind(data.default_rate_cents)
        .bind(data.pricing_rules.as_ref().map(Json))
        .bind(data.free_for_roles.clone())
        .bind(data.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update resource", e))
    }
}
