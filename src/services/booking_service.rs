use chrono::Utc;
use sea_orm::DatabaseConnection;
use sea_orm::prelude::Date;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::booking_repo::{self, NewBooking},
    db::entities::{booking, flight},
    db::flight_repo,
    error::AppError,
};

/// Incoming booking payload. Everything is optional on the wire; the
/// flight reference is the only field validated before insertion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingInput {
    pub passenger_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub seats_booked: Option<i32>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
    pub booking_date: Option<Date>,
    pub flight: Option<FlightRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightRef {
    pub id: Option<Uuid>,
}

/// Resolves the referenced flight, applies date/status/amount defaults
/// and persists the booking. The caller-supplied flight object is only
/// ever used for its id; the stored row always points at the resolved
/// flight.
pub async fn create_booking(
    db: &DatabaseConnection,
    input: BookingInput,
) -> Result<(booking::Model, flight::Model), AppError> {
    let flight_id = require_flight_id(input.flight.as_ref())?;
    let flight = flight_repo::find_by_id(db, &flight_id)
        .await
        .map_err(|err| AppError::internal(format!("Server error: {err}")))?
        .ok_or_else(|| AppError::bad_request("Invalid Flight ID."))?;

    let seats_booked = input.seats_booked.unwrap_or(0);
    let new = NewBooking {
        passenger_name: input.passenger_name.unwrap_or_default(),
        email: input.email.unwrap_or_default(),
        phone: input.phone.unwrap_or_default(),
        seats_booked,
        total_amount: resolve_total_amount(input.total_amount, flight.price, seats_booked),
        status: resolve_status(input.status),
        booking_date: input
            .booking_date
            .unwrap_or_else(|| Utc::now().date_naive()),
        flight_id: flight.id,
    };

    let saved = booking_repo::create_booking(db, new)
        .await
        .map_err(|err| AppError::internal(format!("Server error: {err}")))?;
    Ok((saved, flight))
}

pub async fn list_bookings(
    db: &DatabaseConnection,
) -> Result<Vec<(booking::Model, flight::Model)>, AppError> {
    let rows = booking_repo::list_bookings(db)
        .await
        .map_err(|_| AppError::internal("Booking fetch failed"))?;
    rows.into_iter().map(require_flight_loaded).collect()
}

pub async fn get_booking(
    db: &DatabaseConnection,
    id: &Uuid,
) -> Result<(booking::Model, flight::Model), AppError> {
    let row = booking_repo::find_by_id(db, id)
        .await
        .map_err(|_| AppError::internal("Booking fetch failed"))?
        .ok_or_else(|| AppError::not_found("Booking not found"))?;
    require_flight_loaded(row)
}

pub async fn search_bookings(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Vec<(booking::Model, flight::Model)>, AppError> {
    let rows = booking_repo::search_by_passenger_name(db, name)
        .await
        .map_err(|_| AppError::internal("Booking search failed"))?;
    rows.into_iter().map(require_flight_loaded).collect()
}

pub async fn delete_booking(db: &DatabaseConnection, id: &Uuid) -> Result<(), AppError> {
    let deleted = booking_repo::delete_booking(db, id)
        .await
        .map_err(|_| AppError::internal("Delete booking failed"))?;
    if !deleted {
        return Err(AppError::not_found("Booking not found"));
    }
    Ok(())
}

fn require_flight_id(flight: Option<&FlightRef>) -> Result<Uuid, AppError> {
    flight
        .and_then(|f| f.id)
        .ok_or_else(|| AppError::bad_request("Flight ID is required in the booking payload."))
}

// The flight_id column is a non-null foreign key, so a booking row
// without its flight means the join went wrong, not the data.
fn require_flight_loaded(
    row: (booking::Model, Option<flight::Model>),
) -> Result<(booking::Model, flight::Model), AppError> {
    let (booking, flight) = row;
    let flight = flight.ok_or_else(|| AppError::internal("Booking flight missing"))?;
    Ok((booking, flight))
}

fn resolve_total_amount(supplied: Option<f64>, price: f64, seats_booked: i32) -> f64 {
    match supplied {
        // A positive caller-supplied amount is trusted as-is.
        Some(amount) if amount > 0.0 => amount,
        _ => price * f64::from(seats_booked),
    }
}

fn resolve_status(supplied: Option<String>) -> String {
    match supplied {
        Some(status) if !status.trim().is_empty() => status,
        _ => "Confirmed".to_string(),
    }
}
