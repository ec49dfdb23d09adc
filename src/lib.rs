//! queuepulse -- monitoring view over a persisted log of job executions.
//!
//! This crate provides read-only access to job execution records (filtered,
//! paginated listings and the distinct queue set) plus a metrics engine that
//! compares the trailing N-day window against the window before it.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod records;
pub mod storage;

use anyhow::Result;

use crate::config::MonitorConfig;

/// Start the queuepulse daemon: open the database and serve the API.
pub async fn serve(bind: &str, db_path: &str, config: MonitorConfig) -> Result<()> {
    tracing::info!(%db_path, "Initializing database");
    let pool = storage::open_pool(db_path)?;

    let state = api::state::AppState::new(pool, config);
    let app = api::router(state);

    let addr: std::net::SocketAddr = bind.parse()?;
    tracing::info!(%addr, "queuepulse listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
