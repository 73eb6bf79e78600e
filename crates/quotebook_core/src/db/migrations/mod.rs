//! Ordered schema migrations for the catalog database.
//!
//! # Invariants
//! - Versions strictly increase; each one is applied at most once.
//! - All pending steps run in one transaction together with the
//!   `PRAGMA user_version` bump, so a crash never leaves a half-migrated file.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

struct Step {
    version: u32,
    sql: &'static str,
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        sql: include_str!("0001_quotes.sql"),
    },
    Step {
        version: 2,
        sql: include_str!("0002_preferences.sql"),
    },
];

/// Highest schema version this build knows how to produce.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Applies every step newer than the recorded schema version.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is ahead of this build.
/// - `DbError::Sqlite` when any step fails; nothing is committed then.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let supported = latest_version();
    if ensure_supported(schema_version(conn)?)? == supported {
        return Ok(());
    }

    // Another process may be migrating the same file; re-read under the
    // write lock.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let found = ensure_supported(schema_version(&tx)?)?;
    let pending = STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={found} to_version={supported} steps={}",
        pending.len()
    );
    Ok(())
}

fn ensure_supported(found: u32) -> DbResult<u32> {
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }
    Ok(found)
}
