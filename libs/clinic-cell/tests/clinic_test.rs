use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portal_client::{BackendClient, ClientError};
use portal_config::PortalConfig;

use clinic_cell::services::clinic::ClinicService;

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

fn service_for(server: &MockServer) -> ClinicService {
    ClinicService::with_backend(Arc::new(BackendClient::new(&test_config(&server.uri()))))
}

fn clinic_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "address": "5 High Street",
        "city": "London",
        "phone": "020 7946 0000"
    })
}

#[tokio::test]
async fn search_forwards_both_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/clinics"))
        .and(query_param("city", "London"))
        .and(query_param("name", "Bright"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([clinic_json("C1", "Bright Smiles")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let clinics = service_for(&server)
        .search(Some("London"), Some("Bright"), None)
        .await
        .unwrap();

    assert_eq!(clinics.len(), 1);
    assert_eq!(clinics[0].id, "C1");
    assert_eq!(clinics[0].name, "Bright Smiles");
}

#[tokio::test]
async fn blank_filters_are_dropped_from_the_query() {
    let server = MockServer::start().await;

    // No city/name params at all when the filters are blank.
    Mock::given(method("GET"))
        .and(path("/api/v1/clinics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            clinic_json("C1", "Bright Smiles"),
            clinic_json("C2", "Pearl Dental"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let clinics = service_for(&server)
        .search(Some("   "), None, None)
        .await
        .unwrap();

    assert_eq!(clinics.len(), 2);
}

#[tokio::test]
async fn get_returns_a_single_clinic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/clinics/C7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clinic_json("C7", "Molar City")))
        .mount(&server)
        .await;

    let clinic = service_for(&server).get("C7", None).await.unwrap();
    assert_eq!(clinic.id, "C7");
    assert_eq!(clinic.city, "London");
}

#[tokio::test]
async fn missing_clinic_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/clinics/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "clinic not found" })),
        )
        .mount(&server)
        .await;

    let err = service_for(&server).get("ghost", None).await.unwrap_err();
    assert_matches!(err, ClientError::NotFound(_));
}
