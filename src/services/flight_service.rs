use sea_orm::DatabaseConnection;

use crate::{
    db::entities::{booking, flight},
    db::flight_repo::{self, FlightFields},
    error::AppError,
};

pub async fn list_flights(
    db: &DatabaseConnection,
) -> Result<Vec<(flight::Model, Vec<booking::Model>)>, AppError> {
    flight_repo::list_flights(db)
        .await
        .map_err(|_| AppError::internal("Flight fetch failed"))
}

pub async fn search_flights(
    db: &DatabaseConnection,
    origin: &str,
    destination: &str,
) -> Result<Vec<(flight::Model, Vec<booking::Model>)>, AppError> {
    flight_repo::search_flights(db, origin, destination)
        .await
        .map_err(|_| AppError::internal("Flight search failed"))
}

/// Duplicate flight numbers are rejected by the unique constraint on
/// `flight_no`; the violation surfaces as a generic failure here.
pub async fn create_flight(
    db: &DatabaseConnection,
    fields: FlightFields,
) -> Result<flight::Model, AppError> {
    flight_repo::create_flight(db, fields)
        .await
        .map_err(|err| AppError::internal(format!("Create flight failed: {err}")))
}

pub async fn update_flight(
    db: &DatabaseConnection,
    flight_no: &str,
    fields: FlightFields,
) -> Result<flight::Model, AppError> {
    let existing = require_flight_by_no(db, flight_no).await?;
    flight_repo::update_flight(db, existing, fields)
        .await
        .map_err(|_| AppError::internal("Update flight failed"))
}

/// Deleting a flight removes its bookings as well (cascade).
pub async fn delete_flight(db: &DatabaseConnection, flight_no: &str) -> Result<(), AppError> {
    let existing = require_flight_by_no(db, flight_no).await?;
    let deleted = flight_repo::delete_flight(db, &existing.id)
        .await
        .map_err(|_| AppError::internal("Delete flight failed"))?;
    if !deleted {
        return Err(AppError::not_found("Flight not found"));
    }
    Ok(())
}

pub async fn bookings_for_flight(
    db: &DatabaseConnection,
    flight: &flight::Model,
) -> Result<Vec<booking::Model>, AppError> {
    flight_repo::bookings_for_flight(db, &flight.id)
        .await
        .map_err(|_| AppError::internal("Booking fetch failed"))
}

async fn require_flight_by_no(
    db: &DatabaseConnection,
    flight_no: &str,
) -> Result<flight::Model, AppError> {
    flight_repo::find_by_flight_no(db, flight_no)
        .await
        .map_err(|_| AppError::internal("Flight fetch failed"))?
        .ok_or_else(|| AppError::not_found("Flight not found"))
}
