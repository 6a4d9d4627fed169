use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use portal_config::PortalConfig;
use portal_models::error::AppError;

use crate::models::MapPin;
use crate::services::clinic::ClinicService;
use crate::services::geocode::GeocodingService;

pub struct ClinicState {
    pub config: PortalConfig,
    pub clinics: ClinicService,
    pub geocoder: GeocodingService,
}

impl ClinicState {
    pub fn new(config: PortalConfig) -> Self {
        let clinics = ClinicService::new(&config);
        let geocoder = GeocodingService::new(&config);
        Self {
            config,
            clinics,
            geocoder,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClinicSearchQuery {
    pub city: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MapPinsQuery {
    pub city: Option<String>,
}

#[axum::debug_handler]
pub async fn search_clinics(
    State(state): State<Arc<ClinicState>>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<ClinicSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let token = auth.as_ref().map(|header| header.token());

    let clinics = state
        .clinics
        .search(query.city.as_deref(), query.name.as_deref(), token)
        .await?;

    Ok(Json(json!({
        "clinics": clinics,
        "total": clinics.len(),
    })))
}

#[axum::debug_handler]
pub async fn get_clinic(
    State(state): State<Arc<ClinicState>>,
    Path(clinic_id): Path<String>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<Value>, AppError> {
    let token = auth.as_ref().map(|header| header.token());
    let clinic = state.clinics.get(&clinic_id, token).await?;
    Ok(Json(json!(clinic)))
}

/// Clinics in a city with best-effort coordinates. One geocoder request per
/// clinic, all in flight at once; a failed lookup leaves that pin unplaced.
#[axum::debug_handler]
pub async fn map_pins(
    State(state): State<Arc<ClinicState>>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<MapPinsQuery>,
) -> Result<Json<Value>, AppError> {
    let token = auth.as_ref().map(|header| header.token());

    let clinics = state
        .clinics
        .search(query.city.as_deref(), None, token)
        .await?;

    let addresses: Vec<String> = clinics
        .iter()
        .map(|clinic| format!("{}, {}", clinic.address, clinic.city))
        .collect();
    let locations = state.geocoder.locate_all(&addresses).await;

    let pins: Vec<MapPin> = clinics
        .into_iter()
        .zip(locations)
        .map(|(clinic, location)| MapPin { clinic, location })
        .collect();

    Ok(Json(json!({
        "pins": pins,
        "total": pins.len(),
    })))
}
