use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod bookings;
pub mod flights;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(flights::router(state.clone()))
        .merge(bookings::router(state))
}
