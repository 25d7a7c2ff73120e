use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::Utc;
use sea_orm::{ConnectOptions, Database};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use airline_server::{
    config::AppConfig, db::booking_repo, routes::router, state::AppState, test_helpers,
};

async fn app_state() -> std::sync::Arc<AppState> {
    let cfg = AppConfig::from_env().expect("load app config");
    let mut opt = ConnectOptions::new(cfg.database_url.clone());
    opt.max_connections(cfg.db_max_connections)
        .min_connections(cfg.db_min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to database");
    db.get_schema_registry("airline_server::db::entities::*")
        .sync(&db)
        .await
        .expect("sync schema");

    AppState::new(db)
}

async fn send(
    state: &std::sync::Arc<AppState>,
    request: Request<Body>,
) -> axum::response::Response {
    router(state.clone()).oneshot(request).await.unwrap()
}

async fn json_response(
    state: &std::sync::Arc<AppState>,
    request: Request<Body>,
) -> (StatusCode, serde_json::Value) {
    let response = send(state, request).await;
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn create_flight(state: &std::sync::Arc<AppState>) -> serde_json::Value {
    let (status, flight) = json_response(
        state,
        Request::builder()
            .method("POST")
            .uri("/api/flights")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "flightNo": format!("FL-{}", Uuid::new_v4()),
                    "origin": "NYC",
                    "destination": "LAX",
                    "departure": "2026-09-01 09:00",
                    "seats": 100,
                    "price": 5000.0,
                    "duration": "6h 15m",
                    "aircraft": "A320",
                })
                .to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    flight
}

async fn create_booking(
    state: &std::sync::Arc<AppState>,
    payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    json_response(
        state,
        Request::builder()
            .method("POST")
            .uri("/api/bookings")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
#[ignore = "requires Postgres database"]
async fn booking_defaults_and_lifecycle() {
    let state = app_state().await;
    let flight = create_flight(&state).await;
    let flight_id = flight["id"].as_str().unwrap().to_string();
    let passenger = format!("Passenger {}", Uuid::new_v4());

    // No totalAmount, status or bookingDate supplied: all defaulted.
    let (status, booking) = create_booking(
        &state,
        json!({
            "passengerName": passenger,
            "email": "p@example.com",
            "phone": "555-0100",
            "seatsBooked": 2,
            "flight": { "id": flight_id },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["totalAmount"].as_f64(), Some(10000.0));
    assert_eq!(booking["status"].as_str(), Some("Confirmed"));
    assert_eq!(
        booking["bookingDate"].as_str(),
        Some(Utc::now().date_naive().to_string().as_str())
    );
    assert_eq!(booking["flight"]["id"].as_str(), Some(flight_id.as_str()));
    assert!(booking["flight"]["bookings"].is_null());
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let (status, fetched) = json_response(
        &state,
        Request::builder()
            .uri(format!("/api/bookings/{}", booking_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["passengerName"].as_str(), Some(passenger.as_str()));

    let (status, all) = json_response(
        &state,
        Request::builder()
            .uri("/api/bookings")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(all
        .as_array()
        .unwrap()
        .iter()
        .any(|entry| entry["id"].as_str() == Some(booking_id.as_str())));

    // Passenger search matches case-insensitively on substrings.
    let needle = passenger.to_uppercase();
    let (status, found) = json_response(
        &state,
        Request::builder()
            .uri(format!(
                "/api/bookings/search?name={}",
                needle.replace(' ', "%20")
            ))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"].as_str(), Some(booking_id.as_str()));

    // A fragment from the middle of the name matches too.
    let fragment = &passenger[10..22];
    let (status, found) = json_response(
        &state,
        Request::builder()
            .uri(format!("/api/bookings/search?name={}", fragment))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"].as_str(), Some(booking_id.as_str()));

    let (status, found) = json_response(
        &state,
        Request::builder()
            .uri(format!("/api/bookings/search?name=no-match-{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 0);

    // The list response embeds the flight's scalar fields.
    let (status, flights) = json_response(
        &state,
        Request::builder()
            .uri("/api/flights")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entry = flights
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["id"].as_str() == Some(flight_id.as_str()))
        .expect("flight present");
    assert_eq!(entry["bookings"].as_array().unwrap().len(), 1);
    assert!(entry["bookings"][0]["flight"].is_null());

    let (status, deleted) = json_response(
        &state,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/bookings/{}", booking_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"].as_str(), Some("Booking deleted."));

    let response = send(
        &state,
        Request::builder()
            .uri(format!("/api/bookings/{}", booking_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/bookings/{}", booking_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/flights/{}", flight["flightNo"].as_str().unwrap()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires Postgres database"]
async fn booking_trusts_positive_total_amount() {
    let state = app_state().await;
    let flight = create_flight(&state).await;
    let flight_id = flight["id"].as_str().unwrap();

    let (status, booking) = create_booking(
        &state,
        json!({
            "passengerName": "Override",
            "seatsBooked": 2,
            "totalAmount": 123.45,
            "status": "Pending",
            "flight": { "id": flight_id },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["totalAmount"].as_f64(), Some(123.45));
    assert_eq!(booking["status"].as_str(), Some("Pending"));

    let response = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/flights/{}", flight["flightNo"].as_str().unwrap()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires Postgres database"]
async fn booking_rejects_missing_or_invalid_flight() {
    let state = app_state().await;

    let (status, body) = create_booking(&state, json!({ "flight": {} })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"].as_str(),
        Some("Flight ID is required in the booking payload.")
    );

    let (status, body) = create_booking(&state, json!({ "passengerName": "No Flight" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"].as_str(),
        Some("Flight ID is required in the booking payload.")
    );

    let (status, body) = create_booking(
        &state,
        json!({ "flight": { "id": Uuid::new_v4() } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"].as_str(), Some("Invalid Flight ID."));
}

#[tokio::test]
#[ignore = "requires Postgres database"]
async fn deleting_flight_cascades_to_bookings() {
    let state = app_state().await;
    let flight = create_flight(&state).await;
    let flight_id = flight["id"].as_str().unwrap().to_string();
    let flight_uuid = Uuid::parse_str(&flight_id).unwrap();

    let mut booking_ids = Vec::new();
    for n in 0..2 {
        let (status, booking) = create_booking(
            &state,
            json!({
                "passengerName": format!("Cascade {}", n),
                "seatsBooked": 1,
                "flight": { "id": flight_id },
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        booking_ids.push(booking["id"].as_str().unwrap().to_string());
    }

    let response = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/flights/{}", flight["flightNo"].as_str().unwrap()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for booking_id in booking_ids {
        let response = send(
            &state,
            Request::builder()
                .uri(format!("/api/bookings/{}", booking_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let remaining = booking_repo::count_by_flight(&state.db, &flight_uuid)
        .await
        .expect("count bookings");
    assert_eq!(remaining, 0);
}

// Routing-only checks; never reach the database.
#[tokio::test]
async fn rejects_non_uuid_booking_id() {
    let app = test_helpers::test_router();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejects_booking_body_without_json_content_type() {
    let app = test_helpers::test_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/bookings")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
