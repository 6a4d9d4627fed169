use serde::{Deserialize, Serialize};

/// Clinic as returned by the upstream backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clinic {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A geocoded coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A clinic with its (possibly unresolved) map location. Geocoding failures
/// leave `location` empty instead of dropping the clinic.
#[derive(Debug, Clone, Serialize)]
pub struct MapPin {
    pub clinic: Clinic,
    pub location: Option<GeoPoint>,
}
