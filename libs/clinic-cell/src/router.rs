use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{self, ClinicState};

pub fn clinic_routes(state: Arc<ClinicState>) -> Router {
    Router::new()
        .route("/search", get(handlers::search_clinics))
        .route("/map-pins", get(handlers::map_pins))
        .route("/{clinic_id}", get(handlers::get_clinic))
        .with_state(state)
}
