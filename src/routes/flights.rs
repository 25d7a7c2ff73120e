use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use sea_orm::prelude::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::entities::{booking, flight},
    db::flight_repo::FlightFields,
    error::AppError,
    services::flight_service,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightResponse {
    pub id: Uuid,
    pub flight_no: String,
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub seats: i32,
    pub price: f64,
    pub duration: String,
    pub aircraft: String,
    pub bookings: Vec<BookingSummary>,
}

/// Booking as embedded in a flight payload: scalar fields only, no
/// flight back-reference, so the output stays acyclic.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: Uuid,
    pub passenger_name: String,
    pub email: String,
    pub phone: String,
    pub seats_booked: i32,
    pub total_amount: f64,
    pub status: String,
    pub booking_date: Date,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/flights", get(list_flights).post(create_flight))
        .route("/api/flights/search", get(search_flights))
        .route(
            "/api/flights/{flight_no}",
            put(update_flight).delete(delete_flight),
        )
        .with_state(state)
}

async fn list_flights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FlightResponse>>, AppError> {
    let flights = flight_service::list_flights(&state.db).await?;
    Ok(Json(flights.into_iter().map(FlightResponse::from).collect()))
}

async fn search_flights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<FlightResponse>>, AppError> {
    let flights =
        flight_service::search_flights(&state.db, &params.origin, &params.destination).await?;
    Ok(Json(flights.into_iter().map(FlightResponse::from).collect()))
}

async fn create_flight(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FlightFields>,
) -> Result<Json<FlightResponse>, AppError> {
    let flight = flight_service::create_flight(&state.db, body).await?;
    Ok(Json(FlightResponse::from((flight, Vec::new()))))
}

async fn update_flight(
    State(state): State<Arc<AppState>>,
    Path(flight_no): Path<String>,
    Json(body): Json<FlightFields>,
) -> Result<Json<FlightResponse>, AppError> {
    let flight = flight_service::update_flight(&state.db, &flight_no, body).await?;
    let bookings = flight_service::bookings_for_flight(&state.db, &flight).await?;
    Ok(Json(FlightResponse::from((flight, bookings))))
}

async fn delete_flight(
    State(state): State<Arc<AppState>>,
    Path(flight_no): Path<String>,
) -> Result<StatusCode, AppError> {
    flight_service::delete_flight(&state.db, &flight_no).await?;
    Ok(StatusCode::NO_CONTENT)
}

impl From<(flight::Model, Vec<booking::Model>)> for FlightResponse {
    fn from((flight, bookings): (flight::Model, Vec<booking::Model>)) -> Self {
        Self {
            id: flight.id,
            flight_no: flight.flight_no,
            origin: flight.origin,
            destination: flight.destination,
            departure: flight.departure,
            seats: flight.seats,
            price: flight.price,
            duration: flight.duration,
            aircraft: flight.aircraft,
            bookings: bookings.into_iter().map(BookingSummary::from).collect(),
        }
    }
}

impl From<booking::Model> for BookingSummary {
    fn from(model: booking::Model) -> Self {
        Self {
            id: model.id,
            passenger_name: model.passenger_name,
            email: model.email,
            phone: model.phone,
            seats_booked: model.seats_booked,
            total_amount: model.total_amount,
            status: model.status,
            booking_date: model.booking_date,
        }
    }
}
