//! Read-only queries over the job execution log.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Row, ToSql};

use crate::error::Result;
use crate::records::{JobExecutionRecord, PageRequest, RecordFilter, RecordPage, RunStateFilter};
use crate::storage::Pool;

/// Filtered, ordered, paginated access to job execution records.
///
/// All operations are side-effect-free reads; the service owns no state
/// beyond the injected connection pool.
#[derive(Clone)]
pub struct RecordQueryService {
    pool: Pool,
}

impl RecordQueryService {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Return one page of records matching `filter`, most recent first,
    /// together with the total count under the same filter.
    ///
    /// Ordering is `started_at DESC, id DESC` -- deterministic across
    /// pages, so concatenating pages reproduces the filtered set exactly.
    pub fn list_records(&self, filter: &RecordFilter, page: PageRequest) -> Result<RecordPage> {
        let conn = self.pool.get()?;

        let (predicate, queue_bind) = filter_predicate(filter);

        let total: u64 = {
            let sql = format!("SELECT COUNT(*) FROM job_executions WHERE {}", predicate);
            let binds: Vec<&dyn ToSql> = queue_bind.iter().map(|q| q as &dyn ToSql).collect();
            conn.query_row(&sql, &binds[..], |row| row.get::<_, i64>(0))? as u64
        };

        let sql = format!(
            "SELECT id, queue, started_at, finished_at, failed, time_elapsed
             FROM job_executions
             WHERE {}
             ORDER BY started_at DESC, id DESC
             LIMIT ? OFFSET ?",
            predicate
        );
        let limit = page.limit();
        let offset = page.offset();
        let mut binds: Vec<&dyn ToSql> = queue_bind.iter().map(|q| q as &dyn ToSql).collect();
        binds.push(&limit);
        binds.push(&offset);

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(&binds[..], record_from_row)?;

        let mut records = Vec::new();
        for r in rows {
            records.push(r?);
        }

        Ok(RecordPage {
            records,
            total,
            page: page.page(),
            per_page: page.per_page(),
        })
    }

    /// All queue names observed across the full record set, each exactly
    /// once, independent of any filter.
    pub fn distinct_queues(&self) -> Result<Vec<String>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT queue FROM job_executions ORDER BY queue")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut queues = Vec::new();
        for r in rows {
            queues.push(r?);
        }
        Ok(queues)
    }
}

/// Translate the filter into a WHERE predicate plus the single optional
/// bind parameter. A fixed branch set over the enumerated run states --
/// never a chain of conditionally-applied builder closures.
fn filter_predicate(filter: &RecordFilter) -> (String, Option<String>) {
    let state_pred = match filter.state {
        RunStateFilter::All => "1 = 1",
        RunStateFilter::Running => "finished_at IS NULL",
        RunStateFilter::Failed => "failed = 1 AND finished_at IS NOT NULL",
        RunStateFilter::Succeeded => "failed = 0 AND finished_at IS NOT NULL",
    };

    match &filter.queue {
        Some(queue) => (format!("{} AND queue = ?", state_pred), Some(queue.clone())),
        None => (state_pred.to_string(), None),
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<JobExecutionRecord> {
    Ok(JobExecutionRecord {
        id: row.get(0)?,
        queue: row.get(1)?,
        started_at: parse_ts(2, &row.get::<_, String>(2)?)?,
        finished_at: match row.get::<_, Option<String>>(3)? {
            Some(s) => Some(parse_ts(3, &s)?),
            None => None,
        },
        failed: row.get(4)?,
        time_elapsed: row.get(5)?,
    })
}

fn parse_ts(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
