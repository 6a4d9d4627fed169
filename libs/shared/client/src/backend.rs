use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use portal_config::PortalConfig;

/// Errors surfaced by the upstream clinic backend, pre-classified so callers
/// can render the right user-facing message without inspecting raw bodies.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Too many requests, please try again later")]
    RateLimited,

    #[error("Backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Message safe to put in front of a user. Transport details are
    /// collapsed into a generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) => {
                "Something went wrong while contacting the clinic. Please try again.".to_string()
            }
            ClientError::Decode(_) => {
                "The clinic returned an unexpected response. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub struct BackendClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BackendClient {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.backend_url.clone(),
            api_key: config.backend_api_key.clone(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(key) = HeaderValue::from_str(&self.api_key) {
            headers.insert("x-api-key", key);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, bearer);
            }
        }

        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.get_headers(auth_token));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Backend error ({}): {}", status, error_text);
            return Err(classify_error(status, &error_text));
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Map a non-success status plus raw body to a typed error. The backend
/// emits structured bodies of the shape `{"message": "...", "errors":
/// {"field": "problem"}}`; both parts are surfaced verbatim when present.
fn classify_error(status: StatusCode, body: &str) -> ClientError {
    let message = extract_message(body);

    if status == StatusCode::TOO_MANY_REQUESTS
        || message.to_lowercase().contains("too many requests")
    {
        return ClientError::RateLimited;
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

fn extract_message(body: &str) -> String {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return fallback_message(body),
    };

    // Field-level validation map takes precedence; each entry is surfaced.
    if let Some(errors) = parsed.get("errors").and_then(Value::as_object) {
        if !errors.is_empty() {
            let details: Vec<String> = errors
                .iter()
                .map(|(field, problem)| {
                    format!("{}: {}", field, problem.as_str().unwrap_or("invalid"))
                })
                .collect();
            return details.join("; ");
        }
    }

    if let Some(message) = parsed.get("message").and_then(Value::as_str) {
        return message.to_string();
    }

    fallback_message(body)
}

fn fallback_message(body: &str) -> String {
    if body.trim().is_empty() {
        "The request could not be completed. Please try again.".to_string()
    } else {
        body.trim().to_string()
    }
}
