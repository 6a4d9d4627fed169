use std::sync::Arc;

use axum::{routing::get, Router};

use availability_cell::router::availability_routes;
use availability_cell::AvailabilityState;
use booking_cell::router::booking_routes;
use booking_cell::BookingState;
use chat_cell::router::chat_routes;
use chat_cell::ChatState;
use clinic_cell::router::clinic_routes;
use clinic_cell::ClinicState;
use portal_config::PortalConfig;

pub fn create_router(config: PortalConfig) -> Router {
    let availability = Arc::new(AvailabilityState::new(config.clone()));
    let booking = Arc::new(BookingState::new(config.clone()));
    let clinics = Arc::new(ClinicState::new(config.clone()));
    let chat = Arc::new(ChatState::new(config));

    Router::new()
        .route("/", get(|| async { "Dental Portal API is running!" }))
        .nest("/clinics", clinic_routes(clinics))
        .nest("/dentists", availability_routes(availability))
        .nest("/bookings", booking_routes(booking))
        .nest("/chat", chat_routes(chat))
}
