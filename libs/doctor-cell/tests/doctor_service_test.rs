use chrono::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::models::{DoctorSearchFilters, Specialization};
use doctor_cell::services::DoctorService;
use shared_config::AppConfig;

fn test_config(base_url: String) -> AppConfig {
    AppConfig {
        supabase_url: base_url,
        supabase_anon_key: "test-anon-key".to_string(),
        supabase_jwt_secret: "test-secret".to_string(),
        booking: Default::default(),
    }
}

fn doctor_json() -> serde_json::Value {
    serde_json::json!({
        "id": "550e8400-e29b-41d4-a716-446655440000",
        "full_name": "Jane Smith",
        "specialization": "Cardiology",
        "consultation_fee": 150.0,
        "available_days": ["monday", "wednesday"],
        "available_hours_start": "09:00",
        "available_hours_end": "17:00",
        "bio": "Interventional cardiologist"
    })
}

#[tokio::test]
async fn search_returns_deserialized_doctors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![doctor_json()]))
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&test_config(mock_server.uri()));
    let doctors = service
        .search_doctors(DoctorSearchFilters {
            query: Some("jane".to_string()),
            specialization: Some(Specialization::Cardiology),
        })
        .await
        .unwrap();

    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0].full_name, "Jane Smith");
    assert_eq!(doctors[0].specialization, Specialization::Cardiology);
}

#[tokio::test]
async fn available_slots_reflect_live_bookings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![doctor_json()]))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![serde_json::json!({
            "doctor_id": "550e8400-e29b-41d4-a716-446655440000",
            "appointment_date": "2026-03-02",
            "appointment_time": "10:00",
            "status": "scheduled"
        })]))
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&test_config(mock_server.uri()));

    // 2026-03-02 is a Monday, one of the doctor's availability days.
    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let slots = service
        .get_available_slots("550e8400-e29b-41d4-a716-446655440000", date, date)
        .await
        .unwrap();

    assert_eq!(slots.len(), 8);
    let ten = slots.iter().find(|s| s.time == "10:00").unwrap();
    assert!(!ten.available);
    assert!(slots.iter().filter(|s| !s.available).count() == 1);
}

#[tokio::test]
async fn non_candidate_date_yields_no_slots() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![doctor_json()]))
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&test_config(mock_server.uri()));

    // 2026-03-03 is a Tuesday, outside the doctor's availability days.
    let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
    let slots = service
        .get_available_slots("550e8400-e29b-41d4-a716-446655440000", tuesday, today)
        .await
        .unwrap();

    assert!(slots.is_empty());
}
