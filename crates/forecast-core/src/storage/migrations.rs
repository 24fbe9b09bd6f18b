//! Schema migrations for the forecast database.
//!
//! The `schema_version` table tracks the last applied migration.

use rusqlite::{Connection, Result as SqliteResult};
use tracing::info;

pub const SCHEMA_VERSION: i32 = 1;

/// Apply all pending migrations.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )?;

    let current = schema_version(conn);
    if current < 1 {
        migrate_v1(conn)?;
    }
    Ok(())
}

/// 0 for a fresh database.
pub fn schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i32>>(0)
    })
    .ok()
    .flatten()
    .unwrap_or(0)
}

/// v1: key-value table holding every persisted document.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        INSERT OR REPLACE INTO schema_version (version) VALUES (1);",
    )?;
    info!(version = 1, "applied schema migration");
    Ok(())
}
