//! Database schema and migrations.

use anyhow::Result;
use rusqlite::Connection;

/// Run all pending migrations.
pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS job_executions (
            id INTEGER PRIMARY KEY,
            queue TEXT NOT NULL,
            started_at TEXT NOT NULL,
            finished_at TEXT,
            failed INTEGER NOT NULL DEFAULT 0,
            time_elapsed REAL
        );

        CREATE INDEX IF NOT EXISTS idx_job_executions_started ON job_executions(started_at);
        CREATE INDEX IF NOT EXISTS idx_job_executions_queue ON job_executions(queue);",
    )?;

    // Migration: add 'time_elapsed' for databases created before it existed
    let has_elapsed: i32 = conn
        .query_row(
            "SELECT count(*) FROM pragma_table_info('job_executions') WHERE name='time_elapsed'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if has_elapsed == 0 {
        conn.execute("ALTER TABLE job_executions ADD COLUMN time_elapsed REAL", [])?;
    }

    Ok(())
}
