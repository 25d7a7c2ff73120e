use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use sea_orm::prelude::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::entities::{booking, flight},
    error::AppError,
    services::booking_service::{self, BookingInput},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub passenger_name: String,
    pub email: String,
    pub phone: String,
    pub seats_booked: i32,
    pub total_amount: f64,
    pub status: String,
    pub booking_date: Date,
    pub flight: FlightInfo,
}

/// Flight as embedded in a booking payload: scalar fields only, no
/// bookings collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightInfo {
    pub id: Uuid,
    pub flight_no: String,
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub seats: i32,
    pub price: f64,
    pub duration: String,
    pub aircraft: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/search", get(search_bookings))
        .route(
            "/api/bookings/{id}",
            get(get_booking).delete(delete_booking),
        )
        .with_state(state)
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BookingInput>,
) -> Result<Json<BookingResponse>, AppError> {
    let saved = booking_service::create_booking(&state.db, body).await?;
    Ok(Json(saved.into()))
}

async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = booking_service::list_bookings(&state.db).await?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

async fn search_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = booking_service::search_bookings(&state.db, &params.name).await?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = booking_service::get_booking(&state.db, &id).await?;
    Ok(Json(booking.into()))
}

async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    booking_service::delete_booking(&state.db, &id).await?;
    Ok(Json(serde_json::json!({ "message": "Booking deleted." })))
}

impl From<(booking::Model, flight::Model)> for BookingResponse {
    fn from((booking, flight): (booking::Model, flight::Model)) -> Self {
        Self {
            id: booking.id,
            passenger_name: booking.passenger_name,
            email: booking.email,
            phone: booking.phone,
            seats_booked: booking.seats_booked,
            total_amount: booking.total_amount,
            status: booking.status,
            booking_date: booking.booking_date,
            flight: flight.into(),
        }
    }
}

impl From<flight::Model> for FlightInfo {
    fn from(model: flight::Model) -> Self {
        Self {
            id: model.id,
            flight_no: model.flight_no,
            origin: model.origin,
            destination: model.destination,
            departure: model.departure,
            seats: model.seats,
            price: model.price,
            duration: model.duration,
            aircraft: model.aircraft,
        }
    }
}
