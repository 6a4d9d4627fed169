use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};

use portal_client::BackendClient;

use crate::error::BookingError;
use crate::models::PatientContact;

pub struct PatientService {
    backend: Arc<BackendClient>,
}

impl PatientService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    /// Create a patient record for an anonymous booking and return its
    /// generated identifier.
    pub async fn create_patient(
        &self,
        contact: &PatientContact,
        auth_token: Option<&str>,
    ) -> Result<String, BookingError> {
        debug!("Creating patient record for anonymous booking");

        let body = json!({
            "first_name": contact.first_name,
            "last_name": contact.last_name,
            "email": contact.email,
            "phone": contact.phone,
        });

        let created: Value = self
            .backend
            .request(Method::POST, "/api/v1/patients", auth_token, Some(body))
            .await
            .map_err(|err| {
                warn!("Patient creation failed: {}", err);
                BookingError::PatientCreationFailed(err.user_message())
            })?;

        // The backend returns ids as strings or numbers depending on the
        // deployment generation.
        let id = created
            .get("id")
            .and_then(|id| match id {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .ok_or_else(|| {
                BookingError::PatientCreationFailed(
                    "backend did not return a patient id".to_string(),
                )
            })?;

        debug!("Patient record created with id {}", id);
        Ok(id)
    }
}
