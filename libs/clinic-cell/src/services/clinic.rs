use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use portal_client::{BackendClient, ClientError};
use portal_config::PortalConfig;

use crate::models::Clinic;

/// Clinic discovery against the upstream backend.
pub struct ClinicService {
    backend: Arc<BackendClient>,
}

impl ClinicService {
    pub fn new(config: &PortalConfig) -> Self {
        Self::with_backend(Arc::new(BackendClient::new(config)))
    }

    pub fn with_backend(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    /// Search clinics by city and/or name fragment. Both filters optional;
    /// an unfiltered search returns the full listing.
    pub async fn search(
        &self,
        city: Option<&str>,
        name: Option<&str>,
        auth_token: Option<&str>,
    ) -> Result<Vec<Clinic>, ClientError> {
        debug!("Searching clinics, city: {:?}, name: {:?}", city, name);

        let mut query_parts = Vec::new();
        if let Some(city) = city.filter(|c| !c.trim().is_empty()) {
            query_parts.push(format!("city={}", urlencoding::encode(city.trim())));
        }
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            query_parts.push(format!("name={}", urlencoding::encode(name.trim())));
        }

        let mut path = "/api/v1/clinics".to_string();
        if !query_parts.is_empty() {
            path.push('?');
            path.push_str(&query_parts.join("&"));
        }

        self.backend
            .request(Method::GET, &path, auth_token, None)
            .await
    }

    /// Fetch a single clinic by id.
    pub async fn get(
        &self,
        clinic_id: &str,
        auth_token: Option<&str>,
    ) -> Result<Clinic, ClientError> {
        let path = format!("/api/v1/clinics/{}", urlencoding::encode(clinic_id));
        self.backend
            .request(Method::GET, &path, auth_token, None)
            .await
    }
}
