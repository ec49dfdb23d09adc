//! Rolling period-over-period metrics over the job execution log.
//!
//! The engine compares a trailing window `[now - N days, now)` against the
//! window of equal length immediately before it, producing three metrics
//! (job count, total execution time, average execution time) each with a
//! percentage delta. Pure function of the stored records and the injected
//! `now`; no state, no writes.

pub mod payload;

pub use self::payload::{AggregateStatistics, Metric, MetricFormat, Metrics, PercentageChange};

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection};

use crate::error::{MonitorError, Result};
use crate::storage::Pool;

/// A half-open time range `[start, end)` over `started_at`.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MetricsEngine {
    pool: Pool,
}

impl MetricsEngine {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Compute the two-window metrics report.
    ///
    /// Returns `Ok(None)` when either window contains no records at all --
    /// the explicit "not enough data yet" outcome, distinct from a data
    /// source failure. With records present, every job started in a window
    /// counts toward `count`; unfinished jobs contribute zero elapsed time
    /// (the average divides total by the full count, matching the source
    /// data's aggregation semantics).
    pub fn compute_metrics(
        &self,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<Metrics>> {
        if window_days == 0 {
            return Err(MonitorError::validation("window_days", "must be >= 1"));
        }

        let conn = self.pool.get()?;
        let span = Duration::days(i64::from(window_days));
        let current = Window {
            start: now - span,
            end: now,
        };
        let previous = Window {
            start: now - span - span,
            end: now - span,
        };

        let Some(cur) = window_aggregate(&conn, &current)? else {
            return Ok(None);
        };
        let Some(prev) = window_aggregate(&conn, &previous)? else {
            return Ok(None);
        };

        Ok(Some(Metrics {
            window_days,
            metrics: vec![
                Metric::new(
                    "Total Jobs Executed",
                    cur.count as f64,
                    prev.count as f64,
                    MetricFormat::Integer,
                ),
                Metric::new(
                    "Total Execution Time",
                    cur.total_elapsed,
                    prev.total_elapsed,
                    MetricFormat::Seconds,
                ),
                Metric::new(
                    "Average Execution Time",
                    cur.average_elapsed,
                    prev.average_elapsed,
                    MetricFormat::Seconds2dp,
                ),
            ],
        }))
    }
}

/// Aggregate one window: count of records started in `[start, end)` and
/// the sum of their elapsed seconds, with missing elapsed times counted
/// as zero. `None` when the window holds no records.
fn window_aggregate(conn: &Connection, window: &Window) -> Result<Option<AggregateStatistics>> {
    let (count, total): (i64, f64) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(COALESCE(time_elapsed, 0)), 0)
         FROM job_executions
         WHERE started_at >= ?1 AND started_at < ?2",
        params![window.start.to_rfc3339(), window.end.to_rfc3339()],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    if count == 0 {
        return Ok(None);
    }

    Ok(Some(AggregateStatistics {
        count: count as u64,
        total_elapsed: total,
        average_elapsed: total / count as f64,
    }))
}
