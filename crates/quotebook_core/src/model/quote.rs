//! Quote record and its pre-import shape.
//!
//! # Invariants
//! - `id` is stable for the lifetime of the row.
//! - `is_favorite` is the only field that changes after import.
//! - `tags` keeps dataset order; delimited text exists only at boundaries.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Database-assigned quote identity.
pub type QuoteId = i64;

/// Year token used by the dataset when the date of a quote is not known.
pub const UNKNOWN_YEAR: &str = "Unknown";

static TAG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[,;|]\s*").expect("valid tag separator regex"));

/// One persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    /// Ordinal from the source spreadsheet, when present.
    pub number: Option<i64>,
    pub category: String,
    pub text: String,
    /// Title of the work the quote comes from.
    pub work: String,
    /// Free-form year, either digits or [`UNKNOWN_YEAR`].
    pub year: String,
    pub tags: Vec<String>,
    pub context: String,
    pub popularity: String,
    pub reference: String,
    pub is_favorite: bool,
}

impl Quote {
    /// Returns whether `year` carries an actual date rather than the
    /// unknown token or an empty cell.
    pub fn has_known_year(&self) -> bool {
        let year = self.year.trim();
        !year.is_empty() && !year.eq_ignore_ascii_case(UNKNOWN_YEAR)
    }
}

/// A dataset record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewQuote {
    pub number: Option<i64>,
    pub category: String,
    pub text: String,
    pub work: String,
    pub year: String,
    pub tags: Vec<String>,
    pub context: String,
    pub popularity: String,
    pub reference: String,
}

impl NewQuote {
    /// Creates a record with the three mandatory fields and an unknown year.
    pub fn new(
        category: impl Into<String>,
        text: impl Into<String>,
        work: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
            work: work.into(),
            year: UNKNOWN_YEAR.to_string(),
            ..Self::default()
        }
    }

    /// Attaches the id the store assigned on insert. Imported rows always
    /// start as non-favorites.
    pub fn into_quote(self, id: QuoteId) -> Quote {
        Quote {
            id,
            number: self.number,
            category: self.category,
            text: self.text,
            work: self.work,
            year: self.year,
            tags: self.tags,
            context: self.context,
            popularity: self.popularity,
            reference: self.reference,
            is_favorite: false,
        }
    }
}

/// Splits a delimited tag string into trimmed, non-empty tags.
///
/// Accepts `,`, `;` and `|` as separators so both the storage encoding and
/// the spreadsheet export decode the same way.
pub fn split_tags(raw: &str) -> Vec<String> {
    TAG_SEPARATOR_RE
        .split(raw.trim())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
