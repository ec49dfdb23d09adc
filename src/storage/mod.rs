//! SQLite storage layer -- schema, pool, and the record write seam.

pub mod schema;

use anyhow::Result;
use chrono::{DateTime, Utc};
use r2d2::Pool as R2D2Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

/// Connection Pool type
pub type Pool = R2D2Pool<SqliteConnectionManager>;

/// Open (or create) the SQLite database and return a connection pool.
pub fn open_pool(path: &str) -> Result<Pool> {
    let manager = SqliteConnectionManager::file(path).with_init(|c| {
        c.execute_batch(
            "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA temp_store = MEMORY;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
        )
    });

    let pool = R2D2Pool::new(manager)?;

    // Run migrations on a single connection
    let conn = pool.get()?;
    schema::migrate(&conn)?;

    Ok(pool)
}

/// Record that a job has started running on `queue`. Returns the record id.
///
/// This is the write seam used by job-execution instrumentation; the
/// monitoring core itself never writes.
pub fn record_started(pool: &Pool, queue: &str, started_at: DateTime<Utc>) -> Result<i64> {
    let conn = pool.get()?;
    conn.execute(
        "INSERT INTO job_executions (queue, started_at) VALUES (?1, ?2)",
        params![queue, started_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Mark a running record as finished. `time_elapsed` is in seconds.
///
/// A record transitions running -> finished exactly once; records already
/// finished are left untouched and the call reports an error.
pub fn record_finished(
    pool: &Pool,
    id: i64,
    finished_at: DateTime<Utc>,
    failed: bool,
    time_elapsed: f64,
) -> Result<()> {
    let conn = pool.get()?;
    let changed = conn.execute(
        "UPDATE job_executions
         SET finished_at = ?2, failed = ?3, time_elapsed = ?4
         WHERE id = ?1 AND finished_at IS NULL",
        params![id, finished_at.to_rfc3339(), failed, time_elapsed],
    )?;
    if changed == 0 {
        anyhow::bail!("job execution {} not found or already finished", id);
    }
    Ok(())
}
