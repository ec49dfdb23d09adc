//! API-level tests: exercise the router against a seeded database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use tower::ServiceExt;

use queuepulse::api::{self, state::AppState};
use queuepulse::config::MonitorConfig;
use queuepulse::storage::{self, record_finished, record_started};

fn seeded_app(config: MonitorConfig) -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("api-test.db");
    let pool = storage::open_pool(db.to_str().unwrap()).unwrap();

    let started = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    let id = record_started(&pool, "default", started).unwrap();
    record_finished(&pool, id, started + Duration::seconds(2), false, 2.0).unwrap();
    record_started(&pool, "mailers", started + Duration::minutes(1)).unwrap();

    let app = api::router(AppState::new(pool, config));
    (app, dir)
}

async fn get(app: axum::Router, uri: &str) -> StatusCode {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    response.status()
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = seeded_app(MonitorConfig::default());
    assert_eq!(get(app, "/api/v1/health").await, StatusCode::OK);
}

#[tokio::test]
async fn test_list_jobs_ok() {
    let (app, _dir) = seeded_app(MonitorConfig::default());
    assert_eq!(get(app, "/api/v1/jobs").await, StatusCode::OK);
}

#[tokio::test]
async fn test_list_jobs_with_filters() {
    let (app, _dir) = seeded_app(MonitorConfig::default());
    assert_eq!(
        get(app, "/api/v1/jobs?state=running&queue=mailers&page=1").await,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_invalid_state_is_rejected() {
    let (app, _dir) = seeded_app(MonitorConfig::default());
    assert_eq!(
        get(app, "/api/v1/jobs?state=exploded").await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_invalid_page_is_rejected() {
    let (app, _dir) = seeded_app(MonitorConfig::default());
    assert_eq!(
        get(app, "/api/v1/jobs?page=0").await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_queues() {
    let (app, _dir) = seeded_app(MonitorConfig::default());
    assert_eq!(get(app, "/api/v1/queues").await, StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_endpoint_responds_when_disabled() {
    let mut config = MonitorConfig::default();
    config.ui.show_metrics = false;
    let (app, _dir) = seeded_app(config);
    // Disabled is an absent section, not an error.
    assert_eq!(get(app, "/api/v1/metrics").await, StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_endpoint_responds_when_enabled() {
    let (app, _dir) = seeded_app(MonitorConfig::default());
    assert_eq!(get(app, "/api/v1/metrics").await, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _dir) = seeded_app(MonitorConfig::default());
    assert_eq!(get(app, "/api/v1/nope").await, StatusCode::NOT_FOUND);
}
