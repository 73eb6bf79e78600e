//! Repository layer: SQL access for quotes and preferences.
//!
//! # Responsibility
//! - Keep SQL and row decoding out of the stores and the view model.
//! - Convert between domain shapes and their storage encodings.
//!
//! # Invariants
//! - Repositories never open transactions themselves; callers own
//!   transaction scope so import stays all-or-nothing.
//! - Rows that cannot be decoded are reported as `InvalidData`, not skipped.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod preference_repo;
pub mod quote_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error shared by the catalog repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "expected 0 or 1 in {column}, got `{other}`"
        ))),
    }
}
