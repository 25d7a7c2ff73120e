pub mod booking_repo;
pub mod entities;
pub mod flight_repo;
