//! Quote repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing order is insertion order (`id ASC`) for every query.
//! - `is_favorite` is the only column an update may touch.
//! - Tags are stored as a JSON array of strings and read back unchanged.

use super::{bool_to_int, int_to_bool, RepoError, RepoResult};
use crate::model::quote::{NewQuote, Quote, QuoteId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const QUOTE_SELECT_SQL: &str = "SELECT
    id,
    number,
    category,
    quote,
    work,
    year,
    tags,
    context,
    popularity,
    reference,
    is_favorite
FROM quotes";

/// Filter applied to a quote listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuoteQuery {
    All,
    Favorites,
    /// Exact, case-sensitive category match.
    Category(String),
    /// Exact, case-sensitive work title match.
    Work(String),
}

/// Data access contract for quote rows.
pub trait QuoteRepository {
    fn count(&self) -> RepoResult<u64>;
    /// Inserts rows in slice order and returns the assigned ids.
    fn insert_all(&self, quotes: &[NewQuote]) -> RepoResult<Vec<QuoteId>>;
    fn get(&self, id: QuoteId) -> RepoResult<Option<Quote>>;
    fn list(&self, query: &QuoteQuery) -> RepoResult<Vec<Quote>>;
    /// Returns `false` when no row has `id`.
    fn set_favorite(&self, id: QuoteId, value: bool) -> RepoResult<bool>;
}

/// SQLite-backed quote repository over a borrowed connection or transaction.
pub struct SqliteQuoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl QuoteRepository for SqliteQuoteRepository<'_> {
    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM quotes;", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn insert_all(&self, quotes: &[NewQuote]) -> RepoResult<Vec<QuoteId>> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO quotes (
                number,
                category,
                quote,
                work,
                year,
                tags,
                context,
                popularity,
                reference,
                is_favorite
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0);",
        )?;

        let mut ids = Vec::with_capacity(quotes.len());
        for quote in quotes {
            let tags = encode_tags(&quote.tags)?;
            stmt.execute(params![
                quote.number,
                quote.category.as_str(),
                quote.text.as_str(),
                quote.work.as_str(),
                quote.year.as_str(),
                tags,
                quote.context.as_str(),
                quote.popularity.as_str(),
                quote.reference.as_str(),
            ])?;
            ids.push(self.conn.last_insert_rowid());
        }
        Ok(ids)
    }

    fn get(&self, id: QuoteId) -> RepoResult<Option<Quote>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let raw = stmt.query_row([id], read_raw_row).optional()?;
        raw.map(RawQuoteRow::into_quote).transpose()
    }

    fn list(&self, query: &QuoteQuery) -> RepoResult<Vec<Quote>> {
        let (filter, bind) = match query {
            QuoteQuery::All => ("", None),
            QuoteQuery::Favorites => (" WHERE is_favorite = 1", None),
            QuoteQuery::Category(name) => (" WHERE category = ?1", Some(name.as_str())),
            QuoteQuery::Work(name) => (" WHERE work = ?1", Some(name.as_str())),
        };
        let mut stmt = self
            .conn
            .prepare(&format!("{QUOTE_SELECT_SQL}{filter} ORDER BY id ASC;"))?;

        let raw_rows = match bind {
            Some(value) => stmt
                .query_map([value], read_raw_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
            None => stmt
                .query_map([], read_raw_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
        };

        raw_rows.into_iter().map(RawQuoteRow::into_quote).collect()
    }

    fn set_favorite(&self, id: QuoteId, value: bool) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE quotes SET is_favorite = ?2 WHERE id = ?1;",
            params![id, bool_to_int(value)],
        )?;
        Ok(changed > 0)
    }
}

/// Encodes a tag list into its storage column form.
pub fn encode_tags(tags: &[String]) -> RepoResult<String> {
    serde_json::to_string(tags)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode quotes.tags: {err}")))
}

/// Decodes the storage column written by [`encode_tags`].
pub fn decode_tags(raw: &str) -> RepoResult<Vec<String>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("malformed quotes.tags `{raw}`: {err}")))
}

struct RawQuoteRow {
    quote: Quote,
    tags: String,
    is_favorite: i64,
}

impl RawQuoteRow {
    fn into_quote(self) -> RepoResult<Quote> {
        let mut quote = self.quote;
        quote.tags = decode_tags(&self.tags)?;
        quote.is_favorite = int_to_bool(self.is_favorite, "quotes.is_favorite")?;
        Ok(quote)
    }
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawQuoteRow> {
    Ok(RawQuoteRow {
        quote: Quote {
            id: row.get("id")?,
            number: row.get("number")?,
            category: row.get("category")?,
            text: row.get("quote")?,
            work: row.get("work")?,
            year: row.get("year")?,
            tags: Vec::new(),
            context: row.get("context")?,
            popularity: row.get("popularity")?,
            reference: row.get("reference")?,
            is_favorite: false,
        },
        tags: row.get("tags")?,
        is_favorite: row.get("is_favorite")?,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_tags, encode_tags};
    use crate::repo::RepoError;

    #[test]
    fn tags_with_separator_characters_survive_storage() {
        let tags = vec![
            "war; peace".to_string(),
            "science, religion".to_string(),
            "space | time".to_string(),
        ];
        let stored = encode_tags(&tags).unwrap();
        assert_eq!(decode_tags(&stored).unwrap(), tags);
        assert_eq!(encode_tags(&[]).unwrap(), "[]");
        assert!(decode_tags("").unwrap().is_empty());
    }

    #[test]
    fn non_array_tag_column_is_invalid_data() {
        assert!(matches!(
            decode_tags("peace,war"),
            Err(RepoError::InvalidData(_))
        ));
    }
}
