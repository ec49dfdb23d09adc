//! API route definitions.

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::state::AppState;
use crate::error::Result;
use crate::records::{JobExecutionRecord, PageRequest, RecordFilter, RunState};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/jobs", get(list_jobs))
        .route("/queues", get(list_queues))
        .route("/metrics", get(metrics))
}

async fn health() -> Json<Value> {
    Json(json!({
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        },
        "meta": {
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

#[derive(Debug, Deserialize)]
struct JobsQuery {
    state: Option<String>,
    queue: Option<String>,
    page: Option<u32>,
}

/// Job listing view model: the stored record plus its derived run state.
#[derive(serde::Serialize)]
struct JobView {
    id: i64,
    queue: String,
    state: RunState,
    started_at: String,
    finished_at: Option<String>,
    failed: bool,
    time_elapsed: Option<f64>,
}

impl From<JobExecutionRecord> for JobView {
    fn from(r: JobExecutionRecord) -> Self {
        Self {
            state: r.run_state(),
            id: r.id,
            queue: r.queue,
            started_at: r.started_at.to_rfc3339(),
            finished_at: r.finished_at.map(|t| t.to_rfc3339()),
            failed: r.failed,
            time_elapsed: r.time_elapsed,
        }
    }
}

async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<Value>> {
    let filter = RecordFilter::from_params(params.state.as_deref(), params.queue.as_deref())?;
    let page = PageRequest::new(params.page.unwrap_or(1), state.config.ui.per_page)?;

    // Independent reads: a failure listing queues would not invalidate the
    // page, but both come from the same pool so one error response suffices.
    let result = state.records.list_records(&filter, page)?;
    let queues = state.records.distinct_queues()?;

    let jobs: Vec<JobView> = result.records.into_iter().map(JobView::from).collect();

    Ok(Json(json!({
        "data": jobs,
        "meta": {
            "total": result.total,
            "page": result.page,
            "per_page": result.per_page,
            "queues": queues,
            "filters": {
                "state": filter.state.as_str(),
                "queue": filter.queue_label(),
            }
        }
    })))
}

async fn list_queues(State(state): State<AppState>) -> Result<Json<Value>> {
    let queues = state.records.distinct_queues()?;
    Ok(Json(json!({
        "data": queues,
        "meta": { "total": queues.len() }
    })))
}

async fn metrics(State(state): State<AppState>) -> Result<Json<Value>> {
    if !state.config.ui.show_metrics {
        return Ok(Json(json!({
            "data": null,
            "meta": { "enabled": false }
        })));
    }

    let window_days = state.config.ui.metrics_window_days;
    match state.metrics.compute_metrics(window_days, Utc::now())? {
        Some(report) => Ok(Json(json!({
            "data": report,
            "meta": { "enabled": true, "window_days": window_days }
        }))),
        None => Ok(Json(json!({
            "data": null,
            "meta": {
                "enabled": true,
                "window_days": window_days,
                "message": "not enough data yet"
            }
        }))),
    }
}
