pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use handlers::ClinicState;
pub use models::{Clinic, GeoPoint, MapPin};
pub use router::clinic_routes;
pub use services::clinic::ClinicService;
pub use services::geocode::{normalize_address, GeocodeCache, GeocodingService};
