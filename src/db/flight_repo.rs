use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Deserialize;
use uuid::Uuid;

use super::entities::prelude::{Booking, Flight};
use super::entities::{booking, flight};

/// Mutable flight attributes; `id` and `flight_no` are never
/// overwritten once a flight exists. `flight_no` may be omitted on
/// update payloads, where it is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightFields {
    #[serde(default)]
    pub flight_no: String,
    pub origin: String,
    pub destination: String,
    pub departure: String,
    pub seats: i32,
    pub price: f64,
    pub duration: String,
    pub aircraft: String,
}

pub async fn create_flight(
    db: &DatabaseConnection,
    fields: FlightFields,
) -> Result<flight::Model, sea_orm::DbErr> {
    let model = flight::ActiveModel {
        id: Set(Uuid::new_v4()),
        flight_no: Set(fields.flight_no),
        origin: Set(fields.origin),
        destination: Set(fields.destination),
        departure: Set(fields.departure),
        seats: Set(fields.seats),
        price: Set(fields.price),
        duration: Set(fields.duration),
        aircraft: Set(fields.aircraft),
        ..Default::default()
    };
    model.insert(db).await
}

pub async fn list_flights(
    db: &DatabaseConnection,
) -> Result<Vec<(flight::Model, Vec<booking::Model>)>, sea_orm::DbErr> {
    Flight::find().find_with_related(Booking).all(db).await
}

pub async fn search_flights(
    db: &DatabaseConnection,
    origin: &str,
    destination: &str,
) -> Result<Vec<(flight::Model, Vec<booking::Model>)>, sea_orm::DbErr> {
    Flight::find()
        .filter(flight::Column::Origin.eq(origin))
        .filter(flight::Column::Destination.eq(destination))
        .find_with_related(Booking)
        .all(db)
        .await
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: &Uuid,
) -> Result<Option<flight::Model>, sea_orm::DbErr> {
    Flight::find_by_id(*id).one(db).await
}

pub async fn find_by_flight_no(
    db: &DatabaseConnection,
    flight_no: &str,
) -> Result<Option<flight::Model>, sea_orm::DbErr> {
    Flight::find()
        .filter(flight::Column::FlightNo.eq(flight_no))
        .one(db)
        .await
}

pub async fn bookings_for_flight(
    db: &DatabaseConnection,
    flight_id: &Uuid,
) -> Result<Vec<booking::Model>, sea_orm::DbErr> {
    Booking::find()
        .filter(booking::Column::FlightId.eq(*flight_id))
        .all(db)
        .await
}

pub async fn update_flight(
    db: &DatabaseConnection,
    existing: flight::Model,
    fields: FlightFields,
) -> Result<flight::Model, sea_orm::DbErr> {
    let mut active: flight::ActiveModel = existing.into();
    active.origin = Set(fields.origin);
    active.destination = Set(fields.destination);
    active.departure = Set(fields.departure);
    active.seats = Set(fields.seats);
    active.price = Set(fields.price);
    active.duration = Set(fields.duration);
    active.aircraft = Set(fields.aircraft);
    active.update(db).await
}

pub async fn delete_flight(db: &DatabaseConnection, id: &Uuid) -> Result<bool, sea_orm::DbErr> {
    let result = Flight::delete_by_id(*id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
