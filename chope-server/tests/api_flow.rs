//! End-to-end API tests
//!
//! Drives the full axum router against an in-memory seat store, covering
//! the booking lifecycle, validation surfaces and the ownership gate.

use axum::Router;
use axum::body::Body;
use chope_server::{Config, ServerState, SurrealSeatStore};
use http::{Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tower::ServiceExt;

async fn app() -> Router {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("seats").await.unwrap();
    let store = SurrealSeatStore::new(db, Duration::from_secs(5));
    let config = Config::with_overrides("/tmp/chope-api-test", 0);
    let state = ServerState::with_store(config, Arc::new(store));
    chope_server::api::router(state)
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    read(app.clone().oneshot(request).await.unwrap()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    read(app.clone().oneshot(request).await.unwrap()).await
}

fn booking_request(user: &str, centre: &str, table: u32, seat: u32) -> Value {
    json!({
        "userId": user,
        "foodCentre": centre,
        "tableNumber": table,
        "seatNumber": seat,
        "duration": 60,
    })
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app().await;

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storageBackend"], "surreal");

    let (status, body) = get(&app, "/api/reservations/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "reservations");

    let (status, body) = get(&app, "/api/seats/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "seats");
}

#[tokio::test]
async fn test_policies_endpoint() {
    let app = app().await;

    let (status, body) = get(&app, "/api/reservations/policies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["duration"]["min"], 30);
    assert_eq!(data["duration"]["max"], 120);
    assert_eq!(data["duration"]["default"], 60);
    assert_eq!(data["booking"]["maxAdvanceDays"], 7);
    assert_eq!(data["cancellation"]["windowMinutes"], 15);
    assert_eq!(data["limits"]["maxActiveReservations"], 3);
}

#[tokio::test]
async fn test_validate_rejects_short_duration_with_itemized_details() {
    let app = app().await;

    let mut body = booking_request("user123", "maxwell", 1, 1);
    body["duration"] = json!(10);

    let (status, body) = post(&app, "/api/reservations/validate", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");

    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert!(details[0].as_str().unwrap().contains("30"));
}

#[tokio::test]
async fn test_validate_collects_all_violations() {
    let app = app().await;

    let (status, body) = post(&app, "/api/reservations/validate", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_validate_success_applies_default_duration() {
    let app = app().await;

    let body = json!({
        "userId": "user123",
        "foodCentre": "newton",
        "tableNumber": 2,
        "seatNumber": 3,
    });

    let (status, body) = post(&app, "/api/reservations/validate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Reservation validated successfully");
    assert_eq!(body["data"]["duration"], 60);
    assert_eq!(body["data"]["rules"]["maxDuration"], 120);
    assert_eq!(body["data"]["rules"]["cancellationWindow"], 15);
}

#[tokio::test]
async fn test_validate_cancellation_window() {
    let app = app().await;

    // Missing IDs
    let (status, body) = post(&app, "/api/reservations/validate-cancellation", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Reservation ID required");

    let now = shared::util::now_millis();

    // Inside the window (10 minutes ahead)
    let (status, body) = post(
        &app,
        "/api/reservations/validate-cancellation",
        json!({
            "reservationId": "rsv-1",
            "userId": "user123",
            "reservationTime": now + 10 * 60_000,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("15 minutes"));

    // Outside the window (30 minutes ahead)
    let (status, body) = post(
        &app,
        "/api/reservations/validate-cancellation",
        json!({
            "reservationId": "rsv-1",
            "userId": "user123",
            "reservationTime": now + 30 * 60_000,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cancellation allowed");
}

#[tokio::test]
async fn test_availability_lazily_initializes_centre() {
    let app = app().await;

    let (status, body) = get(&app, "/api/seats/availability/maxwell").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["foodCentre"], "maxwell");
    assert_eq!(body["data"]["total"], 72);
    assert_eq!(body["data"]["booked"], 0);
    assert_eq!(body["data"]["available"], 72);
}

#[tokio::test]
async fn test_availability_unknown_centre_404() {
    let app = app().await;

    let (status, body) = get(&app, "/api/seats/availability/orchard").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("orchard"));
}

#[tokio::test]
async fn test_seat_map_shape() {
    let app = app().await;

    let (status, body) = get(&app, "/api/seats/map/newton").await;
    assert_eq!(status, StatusCode::OK);

    let tables = body["data"].as_object().unwrap();
    assert_eq!(tables.len(), 5);
    let table_1 = tables["1"].as_object().unwrap();
    assert_eq!(table_1.len(), 10);
    assert_eq!(table_1["1"]["status"], "available");
    assert_eq!(table_1["1"]["bookedBy"], Value::Null);
}

#[tokio::test]
async fn test_booking_lifecycle_over_http() {
    let app = app().await;

    // Book Maxwell table 1 seat 1 for u1
    let (status, body) = post(&app, "/api/seats/book", booking_request("u1", "maxwell", 1, 1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["bookedBy"], "u1");
    assert_eq!(
        data["expiresAt"].as_i64().unwrap() - data["bookedAt"].as_i64().unwrap(),
        60 * 60_000
    );
    assert!(data["reservationRef"].as_str().unwrap().starts_with("RSV-"));

    // Availability reflects the booking
    let (_, body) = get(&app, "/api/seats/availability/maxwell").await;
    assert_eq!(body["data"]["booked"], 1);
    assert_eq!(body["data"]["available"], 71);

    // A second booking of the same seat conflicts
    let (status, body) = post(&app, "/api/seats/book", booking_request("u2", "maxwell", 1, 1)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Seat is no longer available");

    // History shows the booking for u1 only
    let (status, body) = get(&app, "/api/bookings/u1").await;
    assert_eq!(status, StatusCode::OK);
    let bookings = body["data"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["foodCentre"], "maxwell");
    assert_eq!(bookings[0]["foodCentreName"], "Maxwell Food Centre");
    assert_eq!(bookings[0]["table"], 1);
    assert_eq!(bookings[0]["seat"], 1);

    let (_, body) = get(&app, "/api/bookings/u2").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // A non-owner cannot cancel, and the seat stays booked
    let (status, body) = post(
        &app,
        "/api/seats/cancel",
        json!({"userId": "u2", "foodCentre": "maxwell", "tableNumber": 1, "seatNumber": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You can only cancel your own bookings");

    let (_, body) = get(&app, "/api/seats/availability/maxwell").await;
    assert_eq!(body["data"]["booked"], 1);

    // The owner cancels; the seat becomes available again
    let (status, body) = post(
        &app,
        "/api/seats/cancel",
        json!({"userId": "u1", "foodCentre": "maxwell", "tableNumber": 1, "seatNumber": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking cancelled successfully");

    let (_, body) = get(&app, "/api/seats/availability/maxwell").await;
    assert_eq!(body["data"]["booked"], 0);

    let (_, body) = get(&app, "/api/bookings/u1").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_book_rejects_invalid_payload() {
    let app = app().await;

    let (status, body) = post(&app, "/api/seats/book", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["details"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_book_enforces_active_reservation_limit() {
    let app = app().await;

    for seat in 1..=3 {
        let (status, _) = post(
            &app,
            "/api/seats/book",
            booking_request("u1", "changiVillage", 1, seat),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = post(
        &app,
        "/api/seats/book",
        booking_request("u1", "changiVillage", 1, 4),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Maximum 3"));
}

#[tokio::test]
async fn test_seat_data_validation_endpoint() {
    let app = app().await;

    let (status, body) = post(&app, "/api/seats/validate", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid seat data");
    assert_eq!(body["details"].as_array().unwrap().len(), 3);

    let (status, body) = post(
        &app,
        "/api/seats/validate",
        json!({"foodCentre": "maxwell", "tableNumber": 1, "seats": [1, 2, 3]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Seat data is valid");
}
