// libs/schedule-cell/tests/store_test.rs
//
// SupabaseScheduleStore against a mocked PostgREST endpoint.

use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use schedule_cell::models::ScheduleError;
use schedule_cell::services::{ScheduleStore, SupabaseScheduleStore};
use shared_config::AppConfig;

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        supabase_url: server.uri(),
        supabase_anon_key: "test-anon-key".to_string(),
        clinic_timezone: "UTC".to_string(),
    }
}

#[tokio::test]
async fn load_returns_raw_record() {
    let server = MockServer::start().await;
    let professional_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/professionals"))
        .and(query_param("id", format!("eq.{}", professional_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
            "weekly_hours": { "2": [9, 10] },
            "available_hours": null
        })]))
        .mount(&server)
        .await;

    let store = SupabaseScheduleStore::new(&test_config(&server));
    let raw = store.load(professional_id).await.unwrap();

    assert_eq!(raw["weekly_hours"]["2"], json!([9, 10]));
}

#[tokio::test]
async fn load_of_unknown_professional_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/professionals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    let store = SupabaseScheduleStore::new(&test_config(&server));
    let result = store.load(Uuid::new_v4()).await;

    assert_matches!(result, Err(ScheduleError::Unavailable(_)));
}

#[tokio::test]
async fn save_writes_canonical_field_and_clears_legacy() {
    let server = MockServer::start().await;
    let professional_id = Uuid::new_v4();
    let schedule = json!({ "1": [8, 9] });

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/professionals"))
        .and(query_param("id", format!("eq.{}", professional_id)))
        .and(body_json(json!({
            "weekly_hours": { "1": [8, 9] },
            "available_hours": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
            "weekly_hours": { "1": [8, 9] }
        })]))
        .expect(1)
        .mount(&server)
        .await;

    let store = SupabaseScheduleStore::new(&test_config(&server));
    store.save(professional_id, schedule).await.unwrap();
}

#[tokio::test]
async fn save_failure_is_persist_failed() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/professionals"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;

    let store = SupabaseScheduleStore::new(&test_config(&server));
    let result = store.save(Uuid::new_v4(), json!({})).await;

    assert_matches!(result, Err(ScheduleError::PersistFailed(_)));
}
