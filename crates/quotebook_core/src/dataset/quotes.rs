//! Quote dataset decoding.
//!
//! The export is a flat JSON array of objects keyed `Number`, `Category`,
//! `Quote`, `Work`, `Year`, `Tags`, `Context`, `Popularity`, `Reference`.
//! Spreadsheet exports repeat the header as a data row; those rows are
//! skipped. A missing, null or blank `Year` becomes `Unknown`.

use super::{DatasetError, DatasetResult};
use crate::model::quote::{split_tags, NewQuote, UNKNOWN_YEAR};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const INLINE_DOCUMENT: &str = "<inline quotes>";

/// Anything that can produce the bundled quote records on demand.
///
/// The store only calls this after confirming it is empty, so sources may
/// do file I/O lazily.
pub trait QuoteDatasetSource {
    fn load_quotes(&self) -> DatasetResult<Vec<NewQuote>>;
}

impl QuoteDatasetSource for Vec<NewQuote> {
    fn load_quotes(&self) -> DatasetResult<Vec<NewQuote>> {
        Ok(self.clone())
    }
}

impl QuoteDatasetSource for [NewQuote] {
    fn load_quotes(&self) -> DatasetResult<Vec<NewQuote>> {
        Ok(self.to_vec())
    }
}

/// JSON quote export, either already in memory or on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonQuoteDataset {
    Inline(String),
    File(PathBuf),
}

impl JsonQuoteDataset {
    pub fn from_json(json: impl Into<String>) -> Self {
        Self::Inline(json.into())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl QuoteDatasetSource for JsonQuoteDataset {
    fn load_quotes(&self) -> DatasetResult<Vec<NewQuote>> {
        match self {
            Self::Inline(json) => parse_document(json, INLINE_DOCUMENT),
            Self::File(path) => {
                let json =
                    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
                        path: path.clone(),
                        source,
                    })?;
                parse_document(&json, &path.display().to_string())
            }
        }
    }
}

/// Parses a quote export held in memory.
///
/// # Errors
/// - `DatasetError::Json` when the document is not an array of quote rows.
/// - `DatasetError::InvalidField` when `Number` is neither empty nor an
///   integer.
pub fn parse_quote_dataset(json: &str) -> DatasetResult<Vec<NewQuote>> {
    parse_document(json, INLINE_DOCUMENT)
}

fn parse_document(json: &str, document: &str) -> DatasetResult<Vec<NewQuote>> {
    let rows: Vec<RawQuoteRow> =
        serde_json::from_str(json).map_err(|source| DatasetError::Json {
            document: document.to_string(),
            source,
        })?;

    let mut quotes = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        if row.is_header() {
            continue;
        }
        quotes.push(row.into_new_quote(index)?);
    }
    Ok(quotes)
}

#[derive(Debug, Deserialize)]
struct RawQuoteRow {
    #[serde(rename = "Number", default)]
    number: Option<RawScalar>,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Quote")]
    quote: String,
    #[serde(rename = "Work")]
    work: String,
    #[serde(rename = "Year", default)]
    year: Option<RawScalar>,
    #[serde(rename = "Tags", default)]
    tags: Option<RawTags>,
    #[serde(rename = "Context", default)]
    context: Option<String>,
    #[serde(rename = "Popularity", default)]
    popularity: Option<String>,
    #[serde(rename = "Reference", default)]
    reference: Option<String>,
}

/// Cells that spreadsheet exports emit either as numbers or as text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Integer(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTags {
    Delimited(String),
    List(Vec<String>),
}

impl RawQuoteRow {
    fn is_header(&self) -> bool {
        matches!(&self.number, Some(RawScalar::Text(text)) if text == "Number")
            || self.category == "Category"
    }

    fn into_new_quote(self, row: usize) -> DatasetResult<NewQuote> {
        let number = match self.number {
            None => None,
            Some(RawScalar::Integer(value)) => Some(value),
            Some(RawScalar::Text(text)) if text.trim().is_empty() => None,
            Some(RawScalar::Text(text)) => Some(text.trim().parse::<i64>().map_err(|_| {
                DatasetError::InvalidField {
                    row,
                    field: "Number",
                    message: format!("expected an integer, got `{text}`"),
                }
            })?),
        };

        let year = match self.year {
            None => UNKNOWN_YEAR.to_string(),
            Some(RawScalar::Integer(value)) => value.to_string(),
            Some(RawScalar::Text(text)) if text.trim().is_empty() => UNKNOWN_YEAR.to_string(),
            Some(RawScalar::Text(text)) => text,
        };

        let tags = match self.tags {
            None => Vec::new(),
            Some(RawTags::Delimited(raw)) => split_tags(&raw),
            Some(RawTags::List(list)) => list
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        };

        Ok(NewQuote {
            number,
            category: self.category,
            text: self.quote,
            work: self.work,
            year,
            tags,
            context: self.context.unwrap_or_default(),
            popularity: self.popularity.unwrap_or_default(),
            reference: self.reference.unwrap_or_default(),
        })
    }
}
