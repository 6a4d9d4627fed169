use thiserror::Error;

use portal_client::ClientError;
use portal_models::error::AppError;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Unknown service type: {0}")]
    UnknownService(String),

    #[error("{step} is incomplete: {message}")]
    StepValidation {
        step: &'static str,
        message: String,
    },

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Could not create patient record: {0}")]
    PatientCreationFailed(String),

    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("Too many requests, please try again later")]
    RateLimited,

    #[error("Booking failed: {0}")]
    BackendRejected(String),

    #[error("Booking could not be submitted. Please try again.")]
    Transport,
}

impl From<ClientError> for BookingError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized(msg) => BookingError::Unauthorized(msg),
            ClientError::RateLimited => BookingError::RateLimited,
            ClientError::NotFound(msg) => BookingError::BackendRejected(msg),
            ClientError::Rejected { .. } => BookingError::BackendRejected(err.user_message()),
            ClientError::Transport(_) | ClientError::Decode(_) => BookingError::Transport,
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match &err {
            BookingError::UnknownService(_)
            | BookingError::StepValidation { .. }
            | BookingError::MissingFields(_) => AppError::ValidationError(err.to_string()),
            BookingError::Unauthorized(msg) => AppError::Auth(msg.clone()),
            BookingError::RateLimited => AppError::RateLimited(err.to_string()),
            BookingError::PatientCreationFailed(_) | BookingError::BackendRejected(_) => {
                AppError::Upstream(err.to_string())
            }
            BookingError::Transport => AppError::Internal(err.to_string()),
        }
    }
}
