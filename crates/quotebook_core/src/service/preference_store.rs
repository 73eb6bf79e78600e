//! Preferences store: two durable booleans with live subscribers.
//!
//! # Invariants
//! - `get` never fails for a missing key; it reports the key's default.
//! - A committed `set` is delivered to subscribers of that key before
//!   `set` returns.

use super::StoreResult;
use crate::db::{open_db, open_db_in_memory};
use crate::live::{LiveHub, Subscription};
use crate::model::preference::PreferenceKey;
use crate::repo::preference_repo::{PreferenceRepository, SqlitePreferenceRepository};
use crate::repo::RepoError;
use log::{error, info};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

/// Preference access contract consumed by the view model.
pub trait PreferenceStore: Send + Sync {
    /// Last written value, or `None` when never written.
    fn stored(&self, key: PreferenceKey) -> StoreResult<Option<bool>>;

    fn set(&self, key: PreferenceKey, value: bool) -> StoreResult<()>;

    /// Live value of one key, starting with its current value.
    fn subscribe(&self, key: PreferenceKey) -> StoreResult<Subscription<bool>>;

    /// Last written value, or the key's default.
    fn get(&self, key: PreferenceKey) -> StoreResult<bool> {
        Ok(self.stored(key)?.unwrap_or_else(|| key.default_value()))
    }
}

/// SQLite-backed preference store.
pub struct SqlitePreferenceStore {
    conn: Mutex<Connection>,
    hub: LiveHub<PreferenceKey, bool>,
}

impl SqlitePreferenceStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            hub: LiveHub::new(),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }
}

fn effective_value(
    repo: &SqlitePreferenceRepository<'_>,
    key: PreferenceKey,
) -> Result<bool, RepoError> {
    Ok(repo.read(key)?.unwrap_or_else(|| key.default_value()))
}

impl PreferenceStore for SqlitePreferenceStore {
    fn stored(&self, key: PreferenceKey) -> StoreResult<Option<bool>> {
        let conn = self.conn.lock();
        Ok(SqlitePreferenceRepository::new(&conn).read(key)?)
    }

    fn set(&self, key: PreferenceKey, value: bool) -> StoreResult<()> {
        let conn = self.conn.lock();
        let repo = SqlitePreferenceRepository::new(&conn);
        if let Err(err) = repo.write(key, value) {
            error!(
                "event=preference_set module=store status=error key={} error={err}",
                key.storage_key()
            );
            return Err(err.into());
        }

        if let Err(err) = self.hub.publish(|subscribed| effective_value(&repo, *subscribed)) {
            error!("event=preference_publish module=store status=error error={err}");
        }
        info!(
            "event=preference_set module=store status=ok key={} value={value}",
            key.storage_key()
        );
        Ok(())
    }

    fn subscribe(&self, key: PreferenceKey) -> StoreResult<Subscription<bool>> {
        let conn = self.conn.lock();
        let current = effective_value(&SqlitePreferenceRepository::new(&conn), key)?;
        Ok(self.hub.subscribe(key, &current, |value: &bool| *value))
    }
}
