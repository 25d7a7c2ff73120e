use sea_orm::prelude::Date;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::entities::prelude::{Booking, Flight};
use super::entities::{booking, flight};

/// A fully resolved booking ready for insertion: the flight reference
/// has already been validated and all defaults applied.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub passenger_name: String,
    pub email: String,
    pub phone: String,
    pub seats_booked: i32,
    pub total_amount: f64,
    pub status: String,
    pub booking_date: Date,
    pub flight_id: Uuid,
}

pub async fn create_booking(
    db: &DatabaseConnection,
    new: NewBooking,
) -> Result<booking::Model, sea_orm::DbErr> {
    let model = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        passenger_name: Set(new.passenger_name),
        email: Set(new.email),
        phone: Set(new.phone),
        seats_booked: Set(new.seats_booked),
        total_amount: Set(new.total_amount),
        status: Set(new.status),
        booking_date: Set(new.booking_date),
        flight_id: Set(new.flight_id),
        ..Default::default()
    };
    model.insert(db).await
}

pub async fn list_bookings(
    db: &DatabaseConnection,
) -> Result<Vec<(booking::Model, Option<flight::Model>)>, sea_orm::DbErr> {
    Booking::find().find_also_related(Flight).all(db).await
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: &Uuid,
) -> Result<Option<(booking::Model, Option<flight::Model>)>, sea_orm::DbErr> {
    Booking::find_by_id(*id).find_also_related(Flight).one(db).await
}

pub async fn search_by_passenger_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Vec<(booking::Model, Option<flight::Model>)>, sea_orm::DbErr> {
    let pattern = format!("%{}%", name.to_lowercase());
    Booking::find()
        .filter(Expr::expr(Func::lower(Expr::col(booking::Column::PassengerName))).like(pattern))
        .find_also_related(Flight)
        .all(db)
        .await
}

pub async fn delete_booking(db: &DatabaseConnection, id: &Uuid) -> Result<bool, sea_orm::DbErr> {
    let result = Booking::delete_by_id(*id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn count_by_flight(
    db: &DatabaseConnection,
    flight_id: &Uuid,
) -> Result<u64, sea_orm::DbErr> {
    Booking::find()
        .filter(booking::Column::FlightId.eq(*flight_id))
        .count(db)
        .await
}
