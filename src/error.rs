//! Error taxonomy for the monitoring core.

use thiserror::Error;

/// Errors surfaced by the record query service and the metrics engine.
///
/// Validation failures carry the offending field so the boundary can name
/// it in the rejection. Data-source failures are never folded into
/// zero-valued results; an empty window is a distinct, non-error outcome.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("invalid value for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("data source error: {0}")]
    DataSource(#[from] rusqlite::Error),

    #[error("data source unavailable: {0}")]
    PoolExhausted(#[from] r2d2::Error),
}

impl MonitorError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
