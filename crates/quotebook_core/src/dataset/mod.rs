//! Bundled dataset parsing.
//!
//! # Responsibility
//! - Turn the bundled quote export into `NewQuote` records.
//! - Turn the four works documents into a typed `WorksCatalog`.
//!
//! # Invariants
//! - Parsing is all-or-nothing: one bad row fails the whole dataset.
//! - Failures are returned to the caller, never replaced by an empty list.

use serde_json::Error as JsonError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod quotes;
pub mod works;

pub use quotes::{parse_quote_dataset, JsonQuoteDataset, QuoteDatasetSource};
pub use works::{WorksCatalog, WorksDocuments};

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Failure while reading or decoding a bundled document.
#[derive(Debug)]
pub enum DatasetError {
    /// The document could not be read from disk.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not valid JSON for the expected shape.
    Json {
        document: String,
        source: JsonError,
    },
    /// A row decoded but one of its fields has an unusable value.
    InvalidField {
        row: usize,
        field: &'static str,
        message: String,
    },
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read dataset `{}`: {source}", path.display())
            }
            Self::Json { document, source } => write!(
                f,
                "malformed dataset `{document}` at line {} column {}: {source}",
                source.line(),
                source.column()
            ),
            Self::InvalidField {
                row,
                field,
                message,
            } => write!(f, "invalid `{field}` in dataset row {row}: {message}"),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidField { .. } => None,
        }
    }
}
