//! Quote store: durable catalog with live, filtered views.
//!
//! # Responsibility
//! - Seed the catalog once from the bundled dataset.
//! - Serve point lookups, filtered snapshots and live sequences.
//! - Persist favorite toggles and republish affected views.
//!
//! # Invariants
//! - Import happens inside one `BEGIN IMMEDIATE` transaction: the emptiness
//!   check and every insert commit together or not at all, and concurrent
//!   starters serialize on the SQLite write lock.
//! - Publication runs under the connection lock, so subscribers see commits
//!   in order.

use super::{StoreError, StoreResult};
use crate::dataset::QuoteDatasetSource;
use crate::db::{open_db, open_db_in_memory};
use crate::live::{LiveHub, Subscription};
use crate::model::quote::{NewQuote, Quote, QuoteId};
use crate::repo::quote_repo::{QuoteQuery, QuoteRepository, SqliteQuoteRepository};
use log::{debug, error, info};
use parking_lot::Mutex;
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::time::Instant;

/// Result of an import attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The store was empty and now holds `count` records.
    Imported { count: usize },
    /// The store already held `existing` records; nothing was read or written.
    AlreadyPopulated { existing: u64 },
}

/// Quote catalog contract consumed by the view model.
pub trait QuoteCatalog: Send + Sync {
    /// Loads and inserts the dataset only when the catalog is empty.
    ///
    /// The dataset source is not touched when records already exist.
    fn import_if_empty_with<D>(&self, source: &D) -> StoreResult<ImportOutcome>
    where
        D: QuoteDatasetSource + ?Sized;

    fn count(&self) -> StoreResult<u64>;

    fn by_id(&self, id: QuoteId) -> StoreResult<Option<Quote>>;

    /// One-shot read of a filtered listing.
    fn snapshot(&self, query: &QuoteQuery) -> StoreResult<Vec<Quote>>;

    /// Live projection of a filtered listing.
    fn observe<T, F>(&self, query: QuoteQuery, project: F) -> StoreResult<Subscription<T>>
    where
        T: Send + 'static,
        F: Fn(&[Quote]) -> T + Send + 'static;

    /// Sets the favorite flag of one record. Unknown ids are ignored.
    fn set_favorite(&self, id: QuoteId, value: bool) -> StoreResult<()>;

    fn import_if_empty(&self, dataset: &[NewQuote]) -> StoreResult<ImportOutcome> {
        self.import_if_empty_with(dataset)
    }

    fn all(&self) -> StoreResult<Subscription<Vec<Quote>>> {
        self.observe(QuoteQuery::All, <[Quote]>::to_vec)
    }

    fn favorites(&self) -> StoreResult<Subscription<Vec<Quote>>> {
        self.observe(QuoteQuery::Favorites, <[Quote]>::to_vec)
    }

    fn by_category(&self, name: &str) -> StoreResult<Subscription<Vec<Quote>>> {
        self.observe(QuoteQuery::Category(name.to_string()), <[Quote]>::to_vec)
    }

    fn by_work(&self, name: &str) -> StoreResult<Subscription<Vec<Quote>>> {
        self.observe(QuoteQuery::Work(name.to_string()), <[Quote]>::to_vec)
    }
}

/// SQLite-backed quote catalog.
pub struct SqliteQuoteStore {
    conn: Mutex<Connection>,
    hub: LiveHub<QuoteQuery, Vec<Quote>>,
}

impl SqliteQuoteStore {
    /// Wraps an already migrated connection.
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

    /// Number of live subscriptions currently attached.
    pub fn subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }

    fn republish(&self, conn: &Connection) {
        let repo = SqliteQuoteRepository::new(conn);
        if let Err(err) = self.hub.publish(|query| repo.list(query)) {
            // The write is already committed; subscribers keep their previous
            // snapshot until the next successful publish.
            error!("event=quote_publish module=store status=error error={err}");
        }
    }
}

impl QuoteCatalog for SqliteQuoteStore {
    fn import_if_empty_with<D>(&self, source: &D) -> StoreResult<ImportOutcome>
    where
        D: QuoteDatasetSource + ?Sized,
    {
        let started_at = Instant::now();
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = SqliteQuoteRepository::new(&tx).count()?;
        if existing > 0 {
            info!(
                "event=quote_import module=store status=skipped existing={existing} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Ok(ImportOutcome::AlreadyPopulated { existing });
        }

        let quotes = source.load_quotes().map_err(|err| {
            error!(
                "event=quote_import module=store status=error error_code=dataset_invalid duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            StoreError::Dataset(err)
        })?;

        let ids = SqliteQuoteRepository::new(&tx).insert_all(&quotes)?;
        tx.commit()?;
        self.republish(&conn);

        info!(
            "event=quote_import module=store status=ok imported={} first_id={} duration_ms={}",
            ids.len(),
            ids.first().copied().unwrap_or_default(),
            started_at.elapsed().as_millis()
        );
        Ok(ImportOutcome::Imported { count: ids.len() })
    }

    fn count(&self) -> StoreResult<u64> {
        let conn = self.conn.lock();
        Ok(SqliteQuoteRepository::new(&conn).count()?)
    }

    fn by_id(&self, id: QuoteId) -> StoreResult<Option<Quote>> {
        let conn = self.conn.lock();
        Ok(SqliteQuoteRepository::new(&conn).get(id)?)
    }

    fn snapshot(&self, query: &QuoteQuery) -> StoreResult<Vec<Quote>> {
        let conn = self.conn.lock();
        Ok(SqliteQuoteRepository::new(&conn).list(query)?)
    }

    fn observe<T, F>(&self, query: QuoteQuery, project: F) -> StoreResult<Subscription<T>>
    where
        T: Send + 'static,
        F: Fn(&[Quote]) -> T + Send + 'static,
    {
        let conn = self.conn.lock();
        let current = SqliteQuoteRepository::new(&conn).list(&query)?;
        let subscription = self.hub.subscribe(query, &current, move |quotes: &Vec<Quote>| {
            project(quotes.as_slice())
        });
        debug!(
            "event=quote_subscribe module=store status=ok subscription_id={} rows={}",
            subscription.id(),
            current.len()
        );
        Ok(subscription)
    }

    fn set_favorite(&self, id: QuoteId, value: bool) -> StoreResult<()> {
        let conn = self.conn.lock();
        let found = SqliteQuoteRepository::new(&conn).set_favorite(id, value)?;
        if !found {
            debug!("event=favorite_set module=store status=skipped reason=not_found quote_id={id}");
            return Ok(());
        }

        self.republish(&conn);
        debug!("event=favorite_set module=store status=ok quote_id={id} value={value}");
        Ok(())
    }
}
