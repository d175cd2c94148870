//! Integration tests for the booking lifecycle.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{Identity, TestApp, at, studio_spec, yesterday_at};

fn booking_body(
    resource_id: Uuid,
    starts_at: chrono::DateTime<chrono::Utc>,
    ends_at: chrono::DateTime<chrono::Utc>,
    participants: i32,
) -> serde_json::Value {
    json!({
        "resource_id": resource_id,
        "starts_at": starts_at,
        "ends_at": ends_at,
        "participant_count": participants
    })
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_overlap_on_capacity_one_rejected_back_to_back_allowed() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let alice = Identity::new(tenant, "member");
    let bob = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 1, 0))
        .await;

    let first = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(11, 0), 1)),
            Some(&alice),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK, "{:?}", first.body);

    // 10:30..11:30 intersects the held interval.
    let overlapping = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 30), at(11, 30), 1)),
            Some(&bob),
        )
        .await;
    assert_eq!(overlapping.status, StatusCode::CONFLICT);
    assert_eq!(overlapping.error_code(), "SLOT_UNAVAILABLE");

    // 11:00..12:00 touches only the exclusive end boundary.
    let adjacent = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(11, 0), at(12, 0), 1)),
            Some(&bob),
        )
        .await;
    assert_eq!(adjacent.status, StatusCode::OK, "{:?}", adjacent.body);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_concurrent_creates_one_wins() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let alice = Identity::new(tenant, "member");
    let bob = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 1, 0))
        .await;

    let body = booking_body(resource.id, at(14, 0), at(15, 0), 1);
    let (first, second) = tokio::join!(
        app.request("POST", "/api/bookings", Some(body.clone()), Some(&alice)),
        app.request("POST", "/api/bookings", Some(body.clone()), Some(&bob)),
    );

    let mut statuses = [first.status, second.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_free_role_booking_is_instantly_confirmed() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let artist = Identity::new(tenant, "resident_artist");
    let mut spec = studio_spec("Studio A", 4, 5000);
    spec.free_for_roles = vec!["resident_artist".to_string()];
    let resource = app.seed_resource(tenant, &spec).await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(12, 0), 2)),
            Some(&artist),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["status"], "confirmed");
    assert_eq!(response.data()["price_cents"], 0);
    assert!(response.data()["confirmed_at"].is_string());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_paid_booking_pending_then_confirmed() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 4, 2500))
        .await;

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(11, 0), 2)),
            Some(&member),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    assert_eq!(created.data()["status"], "pending");
    assert_eq!(created.data()["price_cents"], 5000);
    let booking_id = created.data()["id"].as_str().expect("booking id").to_string();

    let confirmed = app
        .request(
            "POST",
            &format!("/api/bookings/{}/confirm-payment", booking_id),
            Some(json!({ "succeeded": true, "reference": "pay_123" })),
            Some(&member),
        )
        .await;
    assert_eq!(confirmed.status, StatusCode::OK, "{:?}", confirmed.body);
    assert_eq!(confirmed.data()["status"], "confirmed");
    assert_eq!(confirmed.data()["payment_reference"], "pay_123");

    // A retried callback is an idempotent no-op.
    let retried = app
        .request(
            "POST",
            &format!("/api/bookings/{}/confirm-payment", booking_id),
            Some(json!({ "succeeded": true, "reference": "pay_456" })),
            Some(&member),
        )
        .await;
    assert_eq!(retried.status, StatusCode::OK);
    assert_eq!(retried.data()["status"], "confirmed");
    assert_eq!(retried.data()["payment_reference"], "pay_123");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_failed_payment_keeps_booking_pending() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 4, 2500))
        .await;

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(11, 0), 1)),
            Some(&member),
        )
        .await;
    let booking_id = created.data()["id"].as_str().expect("booking id").to_string();

    let failed = app
        .request(
            "POST",
            &format!("/api/bookings/{}/confirm-payment", booking_id),
            Some(json!({ "succeeded": false, "failure_reason": "card declined" })),
            Some(&member),
        )
        .await;
    assert_eq!(failed.status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(failed.error_code(), "PAYMENT_FAILED");

    // Still pending, so a later retry can succeed.
    let fetched = app
        .request(
            "GET",
            &format!("/api/bookings/{}", booking_id),
            None,
            Some(&member),
        )
        .await;
    assert_eq!(fetched.data()["status"], "pending");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_cancel_own_booking_and_terminal_closure() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(11, 0), 1)),
            Some(&member),
        )
        .await;
    let booking_id = created.data()["id"].as_str().expect("booking id").to_string();

    let cancelled = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", booking_id),
            None,
            Some(&member),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK, "{:?}", cancelled.body);
    assert_eq!(cancelled.data()["status"], "cancelled");

    // Cancelled is terminal; no further transition applies.
    let again = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", booking_id),
            None,
            Some(&member),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.error_code(), "INVALID_TRANSITION");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_other_requesters_booking_is_hidden() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let alice = Identity::new(tenant, "member");
    let bob = Identity::new(tenant, "member");
    let staff = Identity::new(tenant, "staff");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(11, 0), 1)),
            Some(&alice),
        )
        .await;
    let booking_id = created.data()["id"].as_str().expect("booking id").to_string();

    // A different requester cannot even observe the booking.
    let fetched = app
        .request(
            "GET",
            &format!("/api/bookings/{}", booking_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.error_code(), "BOOKING_NOT_FOUND");

    let bob_cancel = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", booking_id),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(bob_cancel.status, StatusCode::NOT_FOUND);

    // Staff may cancel on behalf of the tenant.
    let staff_cancel = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", booking_id),
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(staff_cancel.status, StatusCode::OK, "{:?}", staff_cancel.body);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_bookings_are_tenant_scoped() {
    let app = TestApp::new().await;
    let tenant_a = Uuid::new_v4();
    let member = Identity::new(tenant_a, "member");
    let resource = app
        .seed_resource(tenant_a, &studio_spec("Studio A", 2, 0))
        .await;

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(11, 0), 1)),
            Some(&member),
        )
        .await;
    let booking_id = created.data()["id"].as_str().expect("booking id").to_string();

    // Even a staff caller of another tenant sees nothing.
    let foreign_staff = Identity::new(Uuid::new_v4(), "staff");
    let fetched = app
        .request(
            "GET",
            &format!("/api/bookings/{}", booking_id),
            None,
            Some(&foreign_staff),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    let confirm = app
        .request(
            "POST",
            &format!("/api/bookings/{}/confirm-payment", booking_id),
            Some(json!({ "succeeded": true })),
            Some(&foreign_staff),
        )
        .await;
    assert_eq!(confirm.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_no_show_lifecycle() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let staff = Identity::new(tenant, "staff");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    // A free booking for an interval that has already started.
    let started = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(
                resource.id,
                yesterday_at(10, 0),
                yesterday_at(11, 0),
                1,
            )),
            Some(&member),
        )
        .await;
    assert_eq!(started.status, StatusCode::OK, "{:?}", started.body);
    let started_id = started.data()["id"].as_str().expect("booking id").to_string();

    // Only administrators may mark a no-show.
    let member_attempt = app
        .request(
            "POST",
            &format!("/api/bookings/{}/no-show", started_id),
            None,
            Some(&member),
        )
        .await;
    assert_eq!(member_attempt.status, StatusCode::FORBIDDEN);
    assert_eq!(member_attempt.error_code(), "AUTHORIZATION");

    // A booking that has not started yet cannot be a no-show.
    let future = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(11, 0), 1)),
            Some(&member),
        )
        .await;
    let future_id = future.data()["id"].as_str().expect("booking id").to_string();
    let too_early = app
        .request(
            "POST",
            &format!("/api/bookings/{}/no-show", future_id),
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(too_early.status, StatusCode::CONFLICT);
    assert_eq!(too_early.error_code(), "INVALID_TRANSITION");

    let marked = app
        .request(
            "POST",
            &format!("/api/bookings/{}/no-show", started_id),
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(marked.status, StatusCode::OK, "{:?}", marked.body);
    assert_eq!(marked.data()["status"], "no_show");

    // The requester cannot cancel a no-show; staff can, as a correction.
    let member_cancel = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", started_id),
            None,
            Some(&member),
        )
        .await;
    assert_eq!(member_cancel.status, StatusCode::FORBIDDEN);

    let staff_cancel = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", started_id),
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(staff_cancel.status, StatusCode::OK, "{:?}", staff_cancel.body);
    assert_eq!(staff_cancel.data()["status"], "cancelled");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_ended_booking_not_cancellable_by_requester() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(
                resource.id,
                yesterday_at(10, 0),
                yesterday_at(11, 0),
                1,
            )),
            Some(&member),
        )
        .await;
    let booking_id = created.data()["id"].as_str().expect("booking id").to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", booking_id),
            None,
            Some(&member),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "INVALID_TRANSITION");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_booking_outside_operating_window_rejected() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    // The studio opens at 06:00.
    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(5, 0), at(6, 0), 1)),
            Some(&member),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_TIME_RANGE");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_participant_count_over_capacity_rejected() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(11, 0), 3)),
            Some(&member),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_PARTICIPANT_COUNT");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_list_my_bookings_shows_own_only() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let alice = Identity::new(tenant, "member");
    let bob = Identity::new(tenant, "member");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 4, 0))
        .await;

    for (identity, hour) in [(&alice, 10), (&alice, 12), (&bob, 14)] {
        let response = app
            .request(
                "POST",
                "/api/bookings",
                Some(booking_body(resource.id, at(hour, 0), at(hour + 1, 0), 1)),
                Some(identity),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    let listing = app.request("GET", "/api/bookings", None, Some(&alice)).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.data()["total_items"], 2);
    assert_eq!(listing.data()["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_quote_matches_booking_price() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let student = Identity::new(tenant, "student");
    let mut spec = studio_spec("Studio A", 4, 2500);
    spec.pricing_rules = std::collections::HashMap::from([("student".to_string(), 1000)]);
    let resource = app.seed_resource(tenant, &spec).await;

    let quote = app
        .request(
            "GET",
            &format!("/api/resources/{}/quote?participants=2", resource.id),
            None,
            Some(&student),
        )
        .await;
    assert_eq!(quote.status, StatusCode::OK, "{:?}", quote.body);
    assert_eq!(quote.data()["unit_rate_cents"], 1000);
    assert_eq!(quote.data()["amount_cents"], 2000);
    assert_eq!(quote.data()["role"], "student");

    // An explicit role overrides the caller's own.
    let for_member = app
        .request(
            "GET",
            &format!(
                "/api/resources/{}/quote?participants=2&role=member",
                resource.id
            ),
            None,
            Some(&student),
        )
        .await;
    assert_eq!(for_member.data()["unit_rate_cents"], 2500);
    assert_eq!(for_member.data()["amount_cents"], 5000);

    // The created booking snapshots the quoted price.
    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(booking_body(resource.id, at(10, 0), at(11, 0), 2)),
            Some(&student),
        )
        .await;
    assert_eq!(created.data()["price_cents"], 2000);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_schedule_feed_requires_admin() {
    let app = TestApp::new().await;
    let tenant = Uuid::new_v4();
    let member = Identity::new(tenant, "member");
    let staff = Identity::new(tenant, "staff");
    let resource = app
        .seed_resource(tenant, &studio_spec("Studio A", 2, 0))
        .await;

    app.request(
        "POST",
        "/api/bookings",
        Some(booking_body(resource.id, at(10, 0), at(11, 0), 1)),
        Some(&member),
    )
    .await;

    let schedule_path = format!(
        "/api/resources/{}/schedule?from=2030-06-03T00:00:00Z&to=2030-06-04T00:00:00Z",
        resource.id
    );

    let denied = app.request("GET", &schedule_path, None, Some(&member)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.error_code(), "AUTHORIZATION");

    let feed = app.request("GET", &schedule_path, None, Some(&staff)).await;
    assert_eq!(feed.status, StatusCode::OK, "{:?}", feed.body);
    assert_eq!(feed.data().as_array().expect("schedule array").len(), 1);
}
