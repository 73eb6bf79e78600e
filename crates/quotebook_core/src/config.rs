//! Runtime path configuration resolved from the environment.
//!
//! Hosts that know better (the Flutter shell passes its sandbox paths) call
//! [`CatalogPaths::resolve`] with their own lookup; everything else reads
//! the process environment and falls back to the OS temp directory.

use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "QUOTEBOOK_DB_PATH";
pub const DATASET_PATH_ENV: &str = "QUOTEBOOK_DATASET_PATH";
pub const LOG_DIR_ENV: &str = "QUOTEBOOK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "quotebook.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "quotebook-logs";

/// Filesystem locations used by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub db_path: PathBuf,
    /// Bundled quote export; `None` when the host supplies it in memory.
    pub dataset_path: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl CatalogPaths {
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolves paths through `lookup`, ignoring blank values.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            dataset_path: non_blank(DATASET_PATH_ENV),
            log_dir: non_blank(LOG_DIR_ENV)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
        }
    }
}
