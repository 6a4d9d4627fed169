use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portal_client::BackendClient;
use portal_config::PortalConfig;

use booking_cell::error::BookingError;
use booking_cell::models::{AppointmentPayload, BookingDraft, PatientContact, WizardStep};
use booking_cell::services::submission::BookingSubmissionService;
use booking_cell::services::wizard::BookingWizard;

fn test_config(backend_url: &str) -> PortalConfig {
    PortalConfig {
        backend_url: backend_url.to_string(),
        backend_api_key: "test-api-key".to_string(),
        geocoder_url: "http://localhost:0".to_string(),
        chat_upstream_url: String::new(),
        prefetch_horizon_months: 3,
        load_timeout_secs: 30,
        slot_duration_minutes: 30,
    }
}

fn service_for(server: &MockServer) -> BookingSubmissionService {
    let backend = Arc::new(BackendClient::new(&test_config(&server.uri())));
    BookingSubmissionService::with_backend(backend)
}

fn full_draft() -> BookingDraft {
    BookingDraft {
        clinic_id: Some("C1".to_string()),
        dentist_id: Some("D1".to_string()),
        date: NaiveDate::from_ymd_opt(2025, 6, 10),
        slot_start: NaiveTime::from_hms_opt(9, 0, 0),
        slot_end: NaiveTime::from_hms_opt(9, 30, 0),
        service_key: Some("cleaning".to_string()),
        reason: Some("Routine cleaning".to_string()),
        symptoms: None,
        notes: None,
        urgency: Default::default(),
        patient: Some(PatientContact {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
        }),
    }
}

fn appointment_response() -> serde_json::Value {
    json!({
        "id": "7f4df1a2-9c2b-4a7e-b1d0-3a5e8c6f9b01",
        "patient_id": "P123",
        "dentist_id": "D1",
        "clinic_id": "C1",
        "service_id": 2,
        "date": "2025-06-10",
        "start_time": "09:00:00",
        "end_time": "09:30:00",
        "status": "scheduled"
    })
}

#[tokio::test]
async fn unknown_service_fails_before_any_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/patients"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/appointments"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut draft = full_draft();
    draft.service_key = Some("teleportation".to_string());
    let mut wizard = BookingWizard::new(draft.clone(), false);

    let err = service_for(&server)
        .submit(&mut wizard, None, None)
        .await
        .unwrap_err();

    assert_matches!(err, BookingError::UnknownService(key) if key == "teleportation");
    assert_eq!(wizard.draft, draft);
}

#[tokio::test]
async fn anonymous_booking_creates_a_patient_record_first() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "P123" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/appointments"))
        .and(body_partial_json(json!({
            "patient_id": "P123",
            "created_by": "P123",
            "service_id": 2,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(appointment_response()))
        .expect(1)
        .mount(&server)
        .await;

    let mut wizard = BookingWizard::new(full_draft(), false);
    let outcome = service_for(&server)
        .submit(&mut wizard, None, None)
        .await
        .unwrap();

    assert_eq!(outcome.appointment.patient_id, "P123");
    assert_eq!(wizard.draft, BookingDraft::default());
    assert_eq!(wizard.step, WizardStep::ClinicSelection);
}

#[tokio::test]
async fn failed_patient_creation_prevents_the_appointment_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/patients"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "message": "patient service unavailable" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/appointments"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let draft = full_draft();
    let mut wizard = BookingWizard::new(draft.clone(), false);

    let err = service_for(&server)
        .submit(&mut wizard, None, None)
        .await
        .unwrap_err();

    assert_matches!(err, BookingError::PatientCreationFailed(_));
    assert_eq!(wizard.draft, draft);
}

#[tokio::test]
async fn authenticated_callers_skip_patient_creation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/patients"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/appointments"))
        .and(body_partial_json(json!({ "patient_id": "U9" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(appointment_response()))
        .expect(1)
        .mount(&server)
        .await;

    let mut draft = full_draft();
    draft.patient = None;
    let mut wizard = BookingWizard::new(draft, true);

    service_for(&server)
        .submit(&mut wizard, Some("U9"), Some("token-abc"))
        .await
        .unwrap();
}

#[tokio::test]
async fn backend_field_errors_are_surfaced_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/appointments"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "validation failed",
            "errors": { "date": "is in the past" }
        })))
        .mount(&server)
        .await;

    let draft = full_draft();
    let mut wizard = BookingWizard::new(draft.clone(), true);

    let err = service_for(&server)
        .submit(&mut wizard, Some("U9"), None)
        .await
        .unwrap_err();

    assert_matches!(err, BookingError::BackendRejected(msg) if msg.contains("date: is in the past"));
    assert_eq!(wizard.draft, draft);
}

#[tokio::test]
async fn rate_limiting_maps_to_its_own_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/appointments"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({ "message": "too many requests" })),
        )
        .mount(&server)
        .await;

    let mut wizard = BookingWizard::new(full_draft(), true);
    let err = service_for(&server)
        .submit(&mut wizard, Some("U9"), None)
        .await
        .unwrap_err();

    assert_matches!(err, BookingError::RateLimited);
}

#[test]
fn missing_fields_are_enumerated_by_name() {
    let payload = AppointmentPayload {
        patient_id: Some("P1".to_string()),
        dentist_id: None,
        clinic_id: Some("  ".to_string()),
        created_by: Some("P1".to_string()),
        service_id: Some(2),
        date: None,
        start_time: NaiveTime::from_hms_opt(9, 0, 0),
        end_time: NaiveTime::from_hms_opt(9, 30, 0),
        reason: Some("Checkup".to_string()),
        symptoms: None,
        notes: None,
        urgency: Default::default(),
    };

    assert_eq!(payload.missing_fields(), vec!["dentist_id", "clinic_id", "date"]);
}
