//! Schema bootstrap for the SQLite store.

use rusqlite::Connection;

use crate::storage::StorageError;

/// Current database schema version.
///
/// Increment this when adding a migration step.
const CURRENT_VERSION: i32 = 1;

/// Create the schema if missing and apply any pending migrations.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    // Version tracking table first
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let current = get_current_version(conn)?;

    if current < 1 {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
    }

    if current != CURRENT_VERSION {
        set_version(conn, CURRENT_VERSION)?;
        tracing::info!(
            "Migrated storage schema from version {} to {}",
            current,
            CURRENT_VERSION
        );
    }

    Ok(())
}

fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0)
        })?
        .unwrap_or(0);
    Ok(version)
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
        rusqlite::params![version],
    )?;
    Ok(())
}
