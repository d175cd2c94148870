//! Integration tests for the availability read path.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{Identity, TestApp, at, studio_spec, test_date};

fn availability_path(resource_id: Uuid, start: &str, end: &str) -> String {
    format!(
        "/api/resources/{}/availability?start_date={}&end_date={}",
        resource_id, start, end
    )
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_open_day_tiles_into_hourly_slots() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    let response = app
        .request(
            "GET",
            &availability_path(resource.id, "2030-06-03", "2030-06-03"),
            None,
            Some(&member),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let slots = response.data().as_array().expect("slot array");
    // 06:00..23:00 tiles into 17 hourly slots.
    assert_eq!(slots.len(), 17);
    assert_eq!(slots[0]["starts_at"], "2030-06-03T06:00:00Z");
    assert_eq!(slots[0]["remaining_capacity"], 2);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_booking_reduces_remaining_capacity() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    let booked = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "resource_id": resource.id,
                "starts_at": at(10, 0),
                "ends_at": at(11, 0),
                "participant_count": 1
            })),
            Some(&member),
        )
        .await;
    assert_eq!(booked.status, StatusCode::OK, "{:?}", booked.body);

    let response = app
        .request(
            "GET",
            &availability_path(resource.id, "2030-06-03", "2030-06-03"),
            None,
            Some(&member),
        )
        .await;

    let slots = response.data().as_array().expect("slot array");
    let ten = slots
        .iter()
        .find(|s| s["starts_at"] == "2030-06-03T10:00:00Z")
        .expect("10:00 slot present");
    assert_eq!(ten["remaining_capacity"], 1);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_fully_booked_slot_is_omitted() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 1, 0))
        .await;

    app.request(
        "POST",
        "/api/bookings",
        Some(json!({
            "resource_id": resource.id,
            "starts_at": at(10, 0),
            "ends_at": at(11, 0),
            "participant_count": 1
        })),
        Some(&member),
    )
    .await;

    let response = app
        .request(
            "GET",
            &availability_path(resource.id, "2030-06-03", "2030-06-03"),
            None,
            Some(&member),
        )
        .await;

    let slots = response.data().as_array().expect("slot array");
    assert_eq!(slots.len(), 16);
    assert!(
        !slots
            .iter()
            .any(|s| s["starts_at"] == "2030-06-03T10:00:00Z")
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_cancellation_frees_the_slot() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 1, 0))
        .await;

    let booked = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "resource_id": resource.id,
                "starts_at": at(10, 0),
                "ends_at": at(11, 0),
                "participant_count": 1
            })),
            Some(&member),
        )
        .await;
    let booking_id = booked.data()["id"].as_str().expect("booking id").to_string();

    let cancelled = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", booking_id),
            None,
            Some(&member),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK, "{:?}", cancelled.body);

    // The freed slot reappears on the very next read.
    let response = app
        .request(
            "GET",
            &availability_path(resource.id, "2030-06-03", "2030-06-03"),
            None,
            Some(&member),
        )
        .await;
    let slots = response.data().as_array().expect("slot array");
    assert_eq!(slots.len(), 17);
    assert!(
        slots
            .iter()
            .any(|s| s["starts_at"] == "2030-06-03T10:00:00Z")
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_blackout_date_has_no_slots() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let mut spec = studio_spec("Studio A", 2, 0);
    spec.blackout_dates = vec![test_date()];
    let resource = app.seed_resource(tenant, &spec).await;

    let response = app
        .request(
            "GET",
            &availability_path(resource.id, "2030-06-03", "2030-06-03"),
            None,
            Some(&member),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data().as_array().expect("slot array").len(), 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_reversed_date_range_rejected() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    let response = app
        .request(
            "GET",
            &availability_path(resource.id, "2030-06-04", "2030-06-03"),
            None,
            Some(&member),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_TIME_RANGE");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_over_long_date_range_rejected() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    // 32 days exceeds the default 31-day bound.
    let response = app
        .request(
            "GET",
            &availability_path(resource.id, "2030-06-03", "2030-07-04"),
            None,
            Some(&member),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
}
