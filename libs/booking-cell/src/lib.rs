pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::BookingError;
pub use handlers::BookingState;
pub use models::{
    Appointment, AppointmentPayload, BookingDraft, PatientContact, ServiceType, Urgency,
    WizardStep,
};
pub use services::catalog::{resolve_service, SERVICE_CATALOG};
pub use services::submission::BookingSubmissionService;
pub use services::wizard::BookingWizard;
