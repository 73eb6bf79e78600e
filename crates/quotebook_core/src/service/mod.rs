//! Use-case services: live stores, aggregation, view model and chat.
//!
//! # Responsibility
//! - Own the SQLite connections and serialize writers.
//! - Publish fresh snapshots to live subscribers after each commit.
//! - Compose stores into presentation-facing state and commands.

use crate::dataset::DatasetError;
use crate::db::DbError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod aggregator;
pub mod chat;
pub mod preference_store;
pub mod quote_store;
pub mod reminder;
pub mod selection;
pub mod view_model;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a store operation.
#[derive(Debug)]
pub enum StoreError {
    /// The bundled dataset could not be read or decoded; nothing was
    /// imported.
    Dataset(DatasetError),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dataset(err) => write!(f, "catalog import failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dataset(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DatasetError> for StoreError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}
