use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{self, AvailabilityState};

pub fn availability_routes(state: Arc<AvailabilityState>) -> Router {
    Router::new()
        .route("/{dentist_id}/availability", get(handlers::get_availability))
        .route("/{dentist_id}/slots", get(handlers::get_slots))
        .with_state(state)
}
