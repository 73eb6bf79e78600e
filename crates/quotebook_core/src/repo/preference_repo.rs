//! Preference rows: two fixed boolean keys.

use super::{bool_to_int, int_to_bool, RepoResult};
use crate::model::preference::PreferenceKey;
use rusqlite::{params, Connection, OptionalExtension};

/// Data access contract for stored preferences.
pub trait PreferenceRepository {
    /// `None` when the key was never written.
    fn read(&self, key: PreferenceKey) -> RepoResult<Option<bool>>;
    fn write(&self, key: PreferenceKey, value: bool) -> RepoResult<()>;
}

pub struct SqlitePreferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PreferenceRepository for SqlitePreferenceRepository<'_> {
    fn read(&self, key: PreferenceKey) -> RepoResult<Option<bool>> {
        let value: Option<i64> = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key.storage_key()],
                |row| row.get(0),
            )
            .optional()?;
        value
            .map(|raw| int_to_bool(raw, "preferences.value"))
            .transpose()
    }

    fn write(&self, key: PreferenceKey, value: bool) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key.storage_key(), bool_to_int(value)],
        )?;
        Ok(())
    }
}
