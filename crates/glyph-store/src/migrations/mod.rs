//! Schema migration runner.
//!
//! Migrations run in order on every [`Database::new`] / [`Database::open_at`]
//! call, each guarded by the `user_version` pragma so it applies exactly
//! once.  A ledger written by a newer build is refused outright instead of
//! being read with the wrong schema.
//!
//! [`Database::new`]: crate::database::Database::new
//! [`Database::open_at`]: crate::database::Database::open_at

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.  Bump this and add a new migration module
/// whenever the schema changes.
const CURRENT_VERSION: u32 = 1;

/// Run all pending migrations against the open connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if current > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "ledger schema version {current} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    tracing::debug!(
        current_version = current,
        target_version = CURRENT_VERSION,
        "checking ledger migrations"
    );

    if current < 1 {
        tracing::info!("applying migration v001_initial");
        v001_initial::up(conn).map_err(|e| StoreError::Migration(e.to_string()))?;
        conn.pragma_update(None, "user_version", 1)?;
    }

    // Future migrations would be added here:
    // if current < 2 {
    //     v002_xxx::up(conn)?;
    //     conn.pragma_update(None, "user_version", 2)?;
    // }

    Ok(())
}
