//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use artshub_core::config::AppConfig;
use artshub_entity::resource::{CreateResource, Resource, ResourceKind};

/// A caller identity as forwarded by the fronting gateway.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Tenant the caller belongs to
    pub tenant_id: Uuid,
    /// Requester ID within the tenant
    pub requester_id: Uuid,
    /// Requester role
    pub role: String,
}

impl Identity {
    /// A fresh requester in the given tenant
    pub fn new(tenant_id: Uuid, role: &str) -> Self {
        Self {
            tenant_id,
            requester_id: Uuid::new_v4(),
            role: role.to_string(),
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct seeding
    pub db_pool: PgPool,
}

impl TestApp {
    /// Create a new test application.
    ///
    /// Every test works inside a fresh tenant, so suites run in parallel
    /// against a shared database without cleanup between tests.
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db_pool = artshub_database::connection::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        artshub_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let resource_repo = Arc::new(
            artshub_database::repositories::resource::ResourceRepository::new(db_pool.clone()),
        );
        let booking_repo = Arc::new(
            artshub_database::repositories::booking::BookingRepository::new(db_pool.clone()),
        );

        let payment_gateway = artshub_service::payment::gateway_from_config(&config.payment)
            .expect("Failed to build payment gateway");

        let catalog_service = Arc::new(artshub_service::catalog::CatalogService::new(
            Arc::clone(&resource_repo),
            config.booking.clone(),
        ));
        let availability_service = Arc::new(
            artshub_service::availability::AvailabilityService::new(
                Arc::clone(&resource_repo),
                Arc::clone(&booking_repo),
                config.booking.clone(),
            ),
        );
        let pricing_service = Arc::new(artshub_service::pricing::PricingService::new(Arc::clone(
            &resource_repo,
        )));
        let booking_service = Arc::new(artshub_service::booking::service::BookingService::new(
            Arc::clone(&booking_repo),
            Arc::clone(&resource_repo),
            payment_gateway,
            config.booking.clone(),
        ));

        let app_state = artshub_api::state::AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
            catalog_service,
            availability_service,
            pricing_service,
            booking_service,
        };

        let router = artshub_api::router::build_router(app_state);

        Self { router, db_pool }
    }

    /// Insert a resource directly and return it
    pub async fn seed_resource(&self, tenant_id: Uuid, data: &CreateResource) -> Resource {
        artshub_database::repositories::resource::ResourceRepository::new(self.db_pool.clone())
            .create(tenant_id, data)
            .await
            .expect("Failed to seed resource")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        identity: Option<&Identity>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(identity) = identity {
            req = req
                .header("X-Tenant-Id", identity.tenant_id.to_string())
                .header("X-Requester-Id", identity.requester_id.to_string())
                .header("X-Requester-Role", &identity.role);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// A studio spec with an all-week 06:00..23:00 window and hourly slots
pub fn studio_spec(name: &str, capacity: i32, rate_cents: i64) -> CreateResource {
    CreateResource {
        name: name.to_string(),
        kind: ResourceKind::Space,
        description: None,
        capacity,
        slot_minutes: 60,
        open_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        close_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
        open_days: vec![1, 2, 3, 4, 5, 6, 7],
        blackout_dates: Vec::new(),
        currency: "USD".to_string(),
        default_rate_cents: rate_cents,
        pricing_rules: HashMap::new(),
        free_for_roles: Vec::new(),
    }
}

/// Fixed far-future date so test bookings never brush against "now"
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 3).unwrap()
}

/// Timestamp on `test_date` at the given hour and minute (UTC)
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    test_date().and_hms_opt(hour, minute, 0).unwrap().and_utc()
}

/// Timestamp yesterday at the given hour and minute (UTC), for tests
/// that need an interval which has already started
pub fn yesterday_at(hour: u32, minute: u32) -> DateTime<Utc> {
    (Utc::now() - Duration::days(1))
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_utc()
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or("")
    }
}
