//! Job execution records -- data model and filter types.
//!
//! The monitoring core is read-only: records are created and transitioned
//! (running -> finished, exactly once) by external instrumentation via the
//! storage write seam, and everything in this module is a transient read
//! projection over them.

pub mod query;

pub use self::query::RecordQueryService;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// One row per job run. `time_elapsed` is in seconds and is only
/// meaningful once `finished_at` is set.
#[derive(Debug, Clone, Serialize)]
pub struct JobExecutionRecord {
    pub id: i64,
    pub queue: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub failed: bool,
    pub time_elapsed: Option<f64>,
}

impl JobExecutionRecord {
    /// Derived run state: computed, never stored.
    pub fn run_state(&self) -> RunState {
        match self.finished_at {
            None => RunState::Running,
            Some(_) if self.failed => RunState::Failed,
            Some(_) => RunState::Succeeded,
        }
    }
}

/// Derived state of a single execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Running,
    Succeeded,
    Failed,
}

/// Run-state filter accepted at the boundary. A closed enumeration:
/// anything outside these four values is a validation error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStateFilter {
    #[default]
    All,
    Running,
    Failed,
    Succeeded,
}

impl RunStateFilter {
    pub fn parse(value: &str) -> Result<Self, MonitorError> {
        match value {
            "all" => Ok(Self::All),
            "running" => Ok(Self::Running),
            "failed" => Ok(Self::Failed),
            "succeeded" => Ok(Self::Succeeded),
            other => Err(MonitorError::validation(
                "state",
                format!("'{}' is not one of all, running, failed, succeeded", other),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Running => "running",
            Self::Failed => "failed",
            Self::Succeeded => "succeeded",
        }
    }
}

/// Combined filter criteria for listing records. Both predicates apply
/// conjunctively; `queue: None` means no queue restriction.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub state: RunStateFilter,
    pub queue: Option<String>,
}

impl RecordFilter {
    /// Build a filter from the raw boundary inputs, where `"all"` (or
    /// absence) means unfiltered for either dimension.
    pub fn from_params(state: Option<&str>, queue: Option<&str>) -> Result<Self, MonitorError> {
        let state = match state {
            Some(s) => RunStateFilter::parse(s)?,
            None => RunStateFilter::All,
        };
        let queue = match queue {
            None | Some("all") => None,
            Some(q) if q.is_empty() => {
                return Err(MonitorError::validation("queue", "must not be empty"))
            }
            Some(q) => Some(q.to_string()),
        };
        Ok(Self { state, queue })
    }

    /// The queue value echoed back to callers (`"all"` when unfiltered).
    pub fn queue_label(&self) -> &str {
        self.queue.as_deref().unwrap_or("all")
    }
}

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Result<Self, MonitorError> {
        if page == 0 {
            return Err(MonitorError::validation("page", "must be >= 1"));
        }
        if per_page == 0 {
            return Err(MonitorError::validation("per_page", "must be >= 1"));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }
}

/// One page of records plus the total count under the same filter.
#[derive(Debug, Serialize)]
pub struct RecordPage {
    pub records: Vec<JobExecutionRecord>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(finished: bool, failed: bool) -> JobExecutionRecord {
        let started = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
        JobExecutionRecord {
            id: 1,
            queue: "default".into(),
            started_at: started,
            finished_at: finished.then(|| started + chrono::Duration::seconds(3)),
            failed,
            time_elapsed: finished.then_some(3.0),
        }
    }

    #[test]
    fn test_derived_run_state() {
        assert_eq!(record(false, false).run_state(), RunState::Running);
        assert_eq!(record(true, false).run_state(), RunState::Succeeded);
        assert_eq!(record(true, true).run_state(), RunState::Failed);
    }

    #[test]
    fn test_state_filter_rejects_unknown_value() {
        assert!(RunStateFilter::parse("running").is_ok());
        let err = RunStateFilter::parse("exploded").unwrap_err();
        match err {
            MonitorError::Validation { field, .. } => assert_eq!(field, "state"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_filter_from_params_defaults() {
        let filter = RecordFilter::from_params(None, None).unwrap();
        assert_eq!(filter.state, RunStateFilter::All);
        assert!(filter.queue.is_none());
        assert_eq!(filter.queue_label(), "all");

        let filter = RecordFilter::from_params(Some("failed"), Some("mailers")).unwrap();
        assert_eq!(filter.state, RunStateFilter::Failed);
        assert_eq!(filter.queue.as_deref(), Some("mailers"));
    }

    #[test]
    fn test_page_request_validation() {
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        let page = PageRequest::new(3, 25).unwrap();
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 50);
    }
}
