use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::TypedHeader;
use chrono::{NaiveDate, NaiveTime};
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use portal_config::PortalConfig;
use portal_models::error::AppError;

use crate::models::{BookingDraft, PatientContact, Urgency};
use crate::services::catalog::SERVICE_CATALOG;
use crate::services::submission::BookingSubmissionService;
use crate::services::wizard::BookingWizard;

pub struct BookingState {
    pub config: PortalConfig,
    pub submission: BookingSubmissionService,
}

impl BookingState {
    pub fn new(config: PortalConfig) -> Self {
        let submission = BookingSubmissionService::new(&config);
        Self { config, submission }
    }
}

/// A completed wizard in one request body. Bearer-carrying clients identify
/// the patient with `patient_id`; anonymous ones supply `patient` contact
/// details instead.
#[derive(Debug, Deserialize)]
pub struct BookingSubmissionRequest {
    pub clinic_id: Option<String>,
    pub dentist_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub slot_start: Option<NaiveTime>,
    pub slot_end: Option<NaiveTime>,
    pub service: Option<String>,
    pub reason: Option<String>,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub urgency: Option<Urgency>,
    pub patient_id: Option<String>,
    pub patient: Option<PatientContact>,
}

#[axum::debug_handler]
pub async fn submit_booking(
    State(state): State<Arc<BookingState>>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Json(request): Json<BookingSubmissionRequest>,
) -> Result<Json<Value>, AppError> {
    // The bearer token decides who is authenticated; patient_id is only an
    // identifier and is honored solely alongside one.
    let authenticated = auth.is_some();
    if request.patient_id.is_some() && !authenticated {
        return Err(AppError::Auth(
            "Booking for an existing patient requires a bearer token".to_string(),
        ));
    }
    if authenticated && request.patient_id.is_none() {
        return Err(AppError::BadRequest(
            "patient_id is required when booking with a bearer token".to_string(),
        ));
    }

    let draft = BookingDraft {
        clinic_id: request.clinic_id,
        dentist_id: request.dentist_id,
        date: request.date,
        slot_start: request.slot_start,
        slot_end: request.slot_end,
        service_key: request.service,
        reason: request.reason,
        symptoms: request.symptoms,
        notes: request.notes,
        urgency: request.urgency.unwrap_or_default(),
        patient: request.patient,
    };

    let mut wizard = BookingWizard::new(draft, authenticated);
    let token = auth.as_ref().map(|header| header.token());

    let outcome = state
        .submission
        .submit(&mut wizard, request.patient_id.as_deref(), token)
        .await
        .map_err(AppError::from)?;

    Ok(Json(json!({
        "appointment": outcome.appointment,
        "message": outcome.confirmation,
    })))
}

#[axum::debug_handler]
pub async fn list_services() -> Json<Value> {
    Json(json!({ "services": SERVICE_CATALOG }))
}
