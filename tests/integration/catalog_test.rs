//! Integration tests for catalog management.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{Identity, TestApp, studio_spec};

fn studio_body() -> serde_json::Value {
    json!({
        "name": "Studio A",
        "kind": "space",
        "description": "Rehearsal room with upright piano",
        "capacity": 4,
        "slot_minutes": 60,
        "open_time": "09:00:00",
        "close_time": "21:00:00",
        "open_days": [1, 2, 3, 4, 5],
        "currency": "usd",
        "default_rate_cents": 2500
    })
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_create_resource_as_staff() {
    let app = TestApp::new().await;
    let staff = Identity::new(Uuid::new_v4(), "staff");

    let response = app
        .request("POST", "/api/resources", Some(studio_body()), Some(&staff))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["name"], "Studio A");
    assert_eq!(response.data()["currency"], "USD");
    assert_eq!(response.data()["active"], true);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_create_resource_requires_admin_role() {
    let app = TestApp::new().await;
    let member = Identity::new(Uuid::new_v4(), "member");

    let response = app
        .request("POST", "/api/resources", Some(studio_body()), Some(&member))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "AUTHORIZATION");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_create_resource_rejects_unknown_kind() {
    let app = TestApp::new().await;
    let staff = Identity::new(Uuid::new_v4(), "staff");

    let mut body = studio_body();
    body["kind"] = json!("boat");

    let response = app
        .request("POST", "/api/resources", Some(body), Some(&staff))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_missing_identity_headers_rejected() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/resources", None, None).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "AUTHORIZATION");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_resources_are_tenant_scoped() {
    let app = TestApp::new().await;
    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();
    let resource = app
        .seed_resource(tenant_a, &studio_spec("Studio A", 4, 2500))
        .await;

    let other = Identity::new(tenant_b, "staff");
    let response = app
        .request(
            "GET",
            &format!("/api/resources/{}", resource.id),
            None,
            Some(&other),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "RESOURCE_NOT_FOUND");

    let listing = app.request("GET", "/api/resources", None, Some(&other)).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.data()["total_items"], 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_list_resources_paginates() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    for name in ["Studio A", "Studio B", "Studio C"] {
        app.seed_resource(tenant, &studio_spec(name, 2, 1000)).await;
    }

    let member = Identity::new(tenant, "member");
    let response = app
        .request(
            "GET",
            "/api/resources?page=1&per_page=2",
            None,
            Some(&member),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["items"].as_array().unwrap().len(), 2);
    assert_eq!(response.data()["total_items"], 3);
    assert_eq!(response.data()["total_pages"], 2);
    assert_eq!(response.data()["has_next"], true);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_update_resource_deactivates() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let staff = Identity::new(tenant, "staff");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 4, 2500))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/resources/{}", resource.id),
            Some(json!({ "active": false })),
            Some(&staff),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["active"], false);

    // An inactive resource disappears from the booking surfaces.
    let availability = app
        .request(
            "GET",
            &format!(
                "/api/resources/{}/availability?start_date=2030-06-03&end_date=2030-06-03",
                resource.id
            ),
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(availability.status, StatusCode::NOT_FOUND);
    assert_eq!(availability.error_code(), "RESOURCE_NOT_FOUND");
}
