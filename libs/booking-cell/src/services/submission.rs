use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use portal_client::BackendClient;
use portal_config::PortalConfig;

use crate::error::BookingError;
use crate::models::{Appointment, AppointmentPayload};
use crate::services::catalog;
use crate::services::patient::PatientService;
use crate::services::wizard::BookingWizard;

#[derive(Debug)]
pub struct SubmissionOutcome {
    pub appointment: Appointment,
    pub confirmation: String,
}

/// Validates a completed wizard and turns it into an appointment on the
/// clinic backend. Submission is all-or-nothing from the caller's point of
/// view: every local check runs before the first network call, and the
/// appointment is only created after the patient reference exists.
pub struct BookingSubmissionService {
    backend: Arc<BackendClient>,
    patients: PatientService,
}

impl BookingSubmissionService {
    pub fn new(config: &PortalConfig) -> Self {
        Self::with_backend(Arc::new(BackendClient::new(config)))
    }

    pub fn with_backend(backend: Arc<BackendClient>) -> Self {
        let patients = PatientService::new(Arc::clone(&backend));
        Self { backend, patients }
    }

    /// Submit the wizard. On success the wizard is reset to defaults; on any
    /// failure it is left untouched so the caller can correct and resubmit.
    pub async fn submit(
        &self,
        wizard: &mut BookingWizard,
        caller_patient_id: Option<&str>,
        auth_token: Option<&str>,
    ) -> Result<SubmissionOutcome, BookingError> {
        // Every step predicate is re-checked before anything leaves the
        // process.
        wizard.validate_all()?;

        // An unresolvable service key is fatal before any network call.
        let service_key = wizard.draft.service_key.clone().unwrap_or_default();
        let service = catalog::resolve_service(&service_key)
            .ok_or(BookingError::UnknownService(service_key))?;

        // Anonymous callers get a patient record first; if that fails the
        // appointment is never attempted.
        let patient_id = match caller_patient_id {
            Some(id) => id.to_string(),
            None => {
                let contact = wizard.draft.patient.as_ref().ok_or_else(|| {
                    BookingError::StepValidation {
                        step: "patient info",
                        message: "patient contact details are required".to_string(),
                    }
                })?;
                self.patients.create_patient(contact, auth_token).await?
            }
        };

        let payload = AppointmentPayload {
            patient_id: Some(patient_id.clone()),
            dentist_id: wizard.draft.dentist_id.clone(),
            clinic_id: wizard.draft.clinic_id.clone(),
            created_by: Some(patient_id),
            service_id: Some(service.service_id),
            date: wizard.draft.date,
            start_time: wizard.draft.slot_start,
            end_time: wizard.draft.slot_end,
            reason: wizard.draft.reason.clone(),
            symptoms: wizard.draft.symptoms.clone(),
            notes: wizard.draft.notes.clone(),
            urgency: wizard.draft.urgency,
        };

        let missing = payload.missing_fields();
        if !missing.is_empty() {
            return Err(BookingError::MissingFields(missing));
        }

        debug!(
            "Submitting appointment for dentist {:?} on {:?}",
            payload.dentist_id, payload.date
        );

        let appointment: Appointment = self
            .backend
            .request(
                Method::POST,
                "/api/v1/appointments",
                auth_token,
                Some(json!(payload)),
            )
            .await?;

        info!(
            "Appointment {} booked for {} at {}",
            appointment.id, appointment.date, appointment.start_time
        );

        wizard.reset();

        Ok(SubmissionOutcome {
            appointment,
            confirmation: "Your appointment has been booked.".to_string(),
        })
    }
}
