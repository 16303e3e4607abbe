use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::models::{Availability, DoctorFilters};
use doctor_cell::services::DoctorService;
use shared_http::ApiClient;
use shared_models::error::AppError;
use shared_utils::storage::{MemoryStorage, SessionStorage, TOKEN_KEY};
use shared_utils::test_utils::{MockApiResponses, RecordingNavigator, TestConfig};

fn create_service(mock_server: &MockServer) -> (DoctorService, Arc<MemoryStorage>) {
    let config = TestConfig::with_base_url(mock_server.uri()).to_app_config();
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(TOKEN_KEY, "doctor-jwt").unwrap();
    let client = ApiClient::new(&config, storage.clone(), RecordingNavigator::new());
    (DoctorService::new(Arc::new(client)), storage)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_get_all_doctors_with_filters() {
    let mock_server = MockServer::start().await;
    let (service, _) = create_service(&mock_server);

    Mock::given(method("GET"))
        .and(path("/doctors"))
        .and(query_param("speciality", "cardiology"))
        .and(query_param("location", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::doctor_response(1, "cardiology"),
            MockApiResponses::doctor_response(2, "cardiology")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filters = DoctorFilters {
        speciality: Some("cardiology".into()),
        location: Some("Paris".into()),
    };
    let doctors = service.get_all_doctors(Some(&filters)).await.unwrap();

    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0].id, "1");
    assert_eq!(doctors[0].full_name(), "Claire Martin");
}

#[tokio::test]
async fn test_get_all_doctors_without_filters_sends_no_query() {
    let mock_server = MockServer::start().await;
    let (service, _) = create_service(&mock_server);

    Mock::given(method("GET"))
        .and(path("/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let doctors = service.get_all_doctors(None).await.unwrap();
    assert!(doctors.is_empty());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_get_doctor_availabilities_for_week() {
    let mock_server = MockServer::start().await;
    let (service, _) = create_service(&mock_server);

    Mock::given(method("GET"))
        .and(path("/availabilities/week"))
        .and(query_param("date", "2024-03-04"))
        .and(query_param("page", "1"))
        .and(header("Authorization", "Bearer doctor-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::availability_response(7, "2024-03-04", &["09:00", "10:00"])
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let week = service.get_doctor_availabilities(date(2024, 3, 4), 1).await.unwrap();

    assert_eq!(
        week,
        vec![Availability::new(
            Some(7),
            date(2024, 3, 4),
            vec!["09:00".into(), "10:00".into()]
        )]
    );
}

#[tokio::test]
async fn test_create_availabilities_posts_date_and_slots() {
    let mock_server = MockServer::start().await;
    let (service, _) = create_service(&mock_server);

    Mock::given(method("POST"))
        .and(path("/availabilities"))
        .and(body_json(json!({ "date": "2024-03-05", "slots": ["14:00"] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 12 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let draft = Availability::new(None, date(2024, 3, 5), vec!["14:00".into()]);
    let created = service.create_availabilities(&draft).await.unwrap();

    assert_eq!(created["id"], 12);
}

#[tokio::test]
async fn test_update_availabilities_puts_to_record() {
    let mock_server = MockServer::start().await;
    let (service, _) = create_service(&mock_server);

    Mock::given(method("PUT"))
        .and(path("/availabilities/7"))
        .and(body_json(json!({ "date": "2024-03-04", "slots": ["09:00", "11:00"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let draft = Availability::new(Some(7), date(2024, 3, 4), vec!["09:00".into(), "11:00".into()]);
    service.update_availabilities(&draft, 7).await.unwrap();
}

#[tokio::test]
async fn test_create_without_date_never_hits_network() {
    let mock_server = MockServer::start().await;
    let (service, _) = create_service(&mock_server);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let draft = Availability {
        id: None,
        date: None,
        slots: vec!["09:00".into()],
    };

    assert_matches!(
        service.create_availabilities(&draft).await,
        Err(AppError::Validation(_))
    );
}

#[tokio::test]
async fn test_current_day_appointments_are_paginated() {
    let mock_server = MockServer::start().await;
    let (service, _) = create_service(&mock_server);
    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .and(query_param("date", today.as_str()))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [MockApiResponses::appointment_response("a-1", "d-1", "scheduled")],
            "total": 11,
            "page": 2,
            "pageSize": 10
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = service.get_current_day_appointments(2).await.unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.total, 11);
    assert!(page.is_last_page());
}

#[tokio::test]
async fn test_hourly_and_weekly_appointment_summaries() {
    let mock_server = MockServer::start().await;
    let (service, _) = create_service(&mock_server);

    Mock::given(method("GET"))
        .and(path("/appointments/hours"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourlyData": [{ "hour": "09:00", "patientCount": 3 }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/appointments/week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weeklyData": [{ "date": "2024-03-04", "slots": ["11:00"] }]
        })))
        .mount(&mock_server)
        .await;

    let hourly = service.get_today_appointments_hourly().await.unwrap();
    assert_eq!(hourly.hourly_data[0].patient_count, 3);

    let weekly = service.get_weekly_date_and_hour_appointments().await.unwrap();
    assert_eq!(weekly.weekly_data[0].date, date(2024, 3, 4));
    assert_eq!(weekly.weekly_data[0].slots, vec!["11:00".to_string()]);
}

#[tokio::test]
async fn test_next_two_days_availability() {
    let mock_server = MockServer::start().await;
    let (service, _) = create_service(&mock_server);

    Mock::given(method("GET"))
        .and(path("/next-two-days-availabilities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::availability_response(1, "2024-03-04", &["09:00"]),
            MockApiResponses::availability_response(2, "2024-03-05", &[])
        ])))
        .mount(&mock_server)
        .await;

    let days = service.get_current_and_next_day_availability().await.unwrap();
    assert_eq!(days.len(), 2);
    assert!(days[1].slots.is_empty());
}

#[tokio::test]
async fn test_expired_token_logs_out() {
    let mock_server = MockServer::start().await;
    let (service, storage) = create_service(&mock_server);

    Mock::given(method("GET"))
        .and(path("/appointments/week"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    assert_matches!(
        service.get_weekly_date_and_hour_appointments().await,
        Err(AppError::Auth(_))
    );
    assert!(storage.get_item(TOKEN_KEY).is_none());
}
