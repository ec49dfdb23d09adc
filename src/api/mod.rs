//! API layer -- axum routes, handlers, and middleware.

mod routes;
pub mod state;

use self::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::MonitorError;

/// Build the application router with all API routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}

impl IntoResponse for MonitorError {
    fn into_response(self) -> Response {
        let (status, field) = match &self {
            MonitorError::Validation { field, .. } => (StatusCode::BAD_REQUEST, Some(*field)),
            MonitorError::DataSource(_) | MonitorError::PoolExhausted(_) => {
                tracing::error!(error = %self, "data source failure");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "field": field,
            }
        }));

        (status, body).into_response()
    }
}
