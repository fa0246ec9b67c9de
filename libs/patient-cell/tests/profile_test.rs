use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::models::UpdatePatientProfileRequest;
use patient_cell::services::PatientService;
use shared_config::AppConfig;

const PATIENT_ID: &str = "660e8400-e29b-41d4-a716-446655440001";

fn test_config(base_url: String) -> AppConfig {
    AppConfig {
        supabase_url: base_url,
        supabase_anon_key: "test-anon-key".to_string(),
        supabase_jwt_secret: "test-secret".to_string(),
        booking: Default::default(),
    }
}

fn profile_json() -> serde_json::Value {
    serde_json::json!({
        "id": PATIENT_ID,
        "date_of_birth": "1990-06-01",
        "gender": "female",
        "phone": "+15550100",
        "address": null,
        "emergency_contact_name": null,
        "emergency_contact_phone": null,
        "medical_history": null
    })
}

fn update_request() -> UpdatePatientProfileRequest {
    UpdatePatientProfileRequest {
        date_of_birth: Some("1990-06-01".parse().unwrap()),
        gender: Some("female".to_string()),
        phone: Some("+15550100".to_string()),
        address: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        medical_history: None,
    }
}

#[tokio::test]
async fn missing_profile_reads_as_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    let service = PatientService::new(&test_config(server.uri()));
    let profile = service.get_profile(PATIENT_ID, "token").await.unwrap();

    assert!(profile.is_none());
}

#[tokio::test]
async fn first_save_inserts_a_new_row() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/patients"))
        .respond_with(ResponseTemplate::new(201).set_body_json(vec![profile_json()]))
        .mount(&server)
        .await;

    let service = PatientService::new(&test_config(server.uri()));
    let profile = service
        .upsert_profile(PATIENT_ID, update_request(), "token")
        .await
        .unwrap();

    assert_eq!(profile.id.to_string(), PATIENT_ID);
    assert_eq!(profile.gender.as_deref(), Some("female"));
}

#[tokio::test]
async fn later_saves_patch_the_existing_row() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![profile_json()]))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![profile_json()]))
        .mount(&server)
        .await;

    let service = PatientService::new(&test_config(server.uri()));
    let profile = service
        .upsert_profile(PATIENT_ID, update_request(), "token")
        .await
        .unwrap();

    assert_eq!(profile.phone.as_deref(), Some("+15550100"));
}
