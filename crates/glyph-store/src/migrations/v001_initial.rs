//! v001 -- Initial schema creation.
//!
//! Creates the `scans` table: one row per distinct payload string ever
//! observed by this device.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Scan ledger
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS scans (
    payload_hash       TEXT PRIMARY KEY NOT NULL,  -- BLAKE3 hex of the exact payload string
    expiration_seconds INTEGER NOT NULL,           -- wire sentinel captured at first scan
    first_seen         TEXT NOT NULL,              -- ISO-8601 / RFC-3339
    last_seen          TEXT NOT NULL,
    scan_count         INTEGER NOT NULL
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
