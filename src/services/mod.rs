pub mod booking_service;
pub mod flight_service;
