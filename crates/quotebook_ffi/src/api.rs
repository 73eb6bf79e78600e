//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose catalog, preference and selection use cases to Dart via FRB.
//! - Flatten core errors into response envelopes the UI can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens its own connection to the configured database file.
//!
//! # See also
//! - `quotebook_core::service::view_model` for the in-process equivalent.

use quotebook_core::{
    aggregate_categories, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, quote_of_the_day as quote_of_the_day_inner, random_quote,
    CatalogPaths, Category, ImportOutcome, JsonQuoteDataset, PreferenceKey, PreferenceStore,
    Quote, QuoteCatalog, QuoteQuery, SqlitePreferenceStore, SqliteQuoteStore, StoreResult,
};
use chrono::Local;
use log::warn;
use std::sync::OnceLock;

static CATALOG_PATHS: OnceLock<CatalogPaths> = OnceLock::new();

/// Liveness probe the Dart shell calls before wiring the catalog screens.
///
/// Returns `"pong"` without touching the database.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Version of the linked `quotebook_core`, shown on the about screen.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Starts catalog logging under the app's log directory.
///
/// `level` accepts `trace|debug|info|warn|error` in any case; `log_dir` must
/// be absolute. Calling again with the same pair is a no-op.
///
/// Returns an empty string on success, otherwise the reason logging could
/// not start (bad input, or a different configuration already running).
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One quote as rendered by list and detail screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteItem {
    pub id: i64,
    pub number: Option<i64>,
    pub category: String,
    pub text: String,
    pub work: String,
    pub year: String,
    pub tags: Vec<String>,
    pub context: String,
    pub popularity: String,
    pub reference: String,
    pub is_favorite: bool,
}

/// Category tile for the overview grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    pub name: String,
    pub quote_count: u32,
    pub icon: String,
}

/// Outcome of the startup import step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLoadResponse {
    /// Whether the catalog is ready to browse.
    pub ok: bool,
    /// Records inserted by this call (0 when already populated).
    pub imported: u32,
    /// Records in the catalog after the call.
    pub total: u32,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Listing response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteListResponse {
    pub items: Vec<QuoteItem>,
    pub message: String,
}

/// Single-quote response envelope; `item` is `None` when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDetailResponse {
    pub item: Option<QuoteItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListResponse {
    pub items: Vec<CategoryItem>,
    pub message: String,
}

/// Generic action response envelope for command flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

/// Preference read/write response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceResponse {
    pub ok: bool,
    /// Effective value after the call (the key default on failure).
    pub value: bool,
    pub message: String,
}

/// Imports the bundled dataset when the catalog is empty.
///
/// Input semantics:
/// - `dataset_json`: the quote export as JSON text; `None` reads the file
///   named by `QUOTEBOOK_DATASET_PATH`.
///
/// # FFI contract
/// - Sync call, DB-backed execution; may read the dataset file.
/// - Never panics.
/// - `ok=false` means the catalog is not usable; the UI shows `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_load(dataset_json: Option<String>) -> CatalogLoadResponse {
    let dataset = match dataset_json {
        Some(json) => JsonQuoteDataset::from_json(json),
        None => match &catalog_paths().dataset_path {
            Some(path) => JsonQuoteDataset::from_path(path),
            None => return CatalogLoadResponse::failure("catalog_load failed: no dataset"),
        },
    };

    let result = with_quote_store(|store| {
        let outcome = store.import_if_empty_with(&dataset)?;
        Ok((outcome, store.count()?))
    });
    match result {
        Ok((ImportOutcome::Imported { count }, total)) => CatalogLoadResponse {
            ok: true,
            imported: saturating_u32(count as u64),
            total: saturating_u32(total),
            message: format!("Imported {count} quote(s)."),
        },
        Ok((ImportOutcome::AlreadyPopulated { .. }, total)) => CatalogLoadResponse {
            ok: true,
            imported: 0,
            total: saturating_u32(total),
            message: "Catalog already loaded.".to_string(),
        },
        Err(err) => CatalogLoadResponse::failure(format!("catalog_load failed: {err}")),
    }
}

/// Lists quotes for one screen filter.
///
/// Input semantics:
/// - `filter`: one of `all|favorites|category|work` (case-insensitive).
/// - `value`: category name or work title; required by the last two.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown filters return an empty list with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn quotes_list(filter: String, value: Option<String>) -> QuoteListResponse {
    let query = match parse_query(&filter, value) {
        Ok(query) => query,
        Err(message) => {
            return QuoteListResponse {
                items: Vec::new(),
                message,
            }
        }
    };

    match with_quote_store(|store| store.snapshot(&query)) {
        Ok(quotes) => {
            let message = if quotes.is_empty() {
                "No quotes.".to_string()
            } else {
                format!("Found {} quote(s).", quotes.len())
            };
            QuoteListResponse {
                items: quotes.into_iter().map(to_quote_item).collect(),
                message,
            }
        }
        Err(err) => QuoteListResponse {
            items: Vec::new(),
            message: format!("quotes_list failed: {err}"),
        },
    }
}

/// Loads one quote for the detail screen.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_get(id: i64) -> QuoteDetailResponse {
    detail_response("quote_get", with_quote_store(|store| store.by_id(id)))
}

/// Sets the favorite flag. Unknown ids succeed without effect.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_set_favorite(id: i64, value: bool) -> ActionResponse {
    match with_quote_store(|store| store.set_favorite(id, value)) {
        Ok(()) => ActionResponse {
            ok: true,
            message: if value {
                "Added to favorites.".to_string()
            } else {
                "Removed from favorites.".to_string()
            },
        },
        Err(err) => ActionResponse {
            ok: false,
            message: format!("quote_set_favorite failed: {err}"),
        },
    }
}

/// Category overview ordered by descending quote count.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_list() -> CategoryListResponse {
    match with_quote_store(|store| store.snapshot(&QuoteQuery::All)) {
        Ok(quotes) => CategoryListResponse {
            items: aggregate_categories(&quotes)
                .into_iter()
                .map(to_category_item)
                .collect(),
            message: String::new(),
        },
        Err(err) => CategoryListResponse {
            items: Vec::new(),
            message: format!("categories_list failed: {err}"),
        },
    }
}

/// Quote of the day for the device's local date.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_of_the_day() -> QuoteDetailResponse {
    let today = Local::now().date_naive();
    detail_response(
        "quote_of_the_day",
        with_quote_store(|store| {
            let quotes = store.snapshot(&QuoteQuery::All)?;
            Ok(quote_of_the_day_inner(&quotes, today).cloned())
        }),
    )
}

/// Uniformly random quote; `item=None` on an empty catalog.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_random() -> QuoteDetailResponse {
    detail_response(
        "quote_random",
        with_quote_store(|store| {
            let quotes = store.snapshot(&QuoteQuery::All)?;
            Ok(random_quote(&quotes, &mut rand::thread_rng()).cloned())
        }),
    )
}

/// Reads a preference.
///
/// Input semantics:
/// - `key`: `dark_mode` or `daily_notification`.
#[flutter_rust_bridge::frb(sync)]
pub fn preference_get(key: String) -> PreferenceResponse {
    let key = match parse_preference_key(&key) {
        Ok(key) => key,
        Err(response) => return response,
    };
    match with_preference_store(|store| store.get(key)) {
        Ok(value) => PreferenceResponse {
            ok: true,
            value,
            message: String::new(),
        },
        Err(err) => PreferenceResponse {
            ok: false,
            value: key.default_value(),
            message: format!("preference_get failed: {err}"),
        },
    }
}

/// Persists a preference and returns the stored value.
#[flutter_rust_bridge::frb(sync)]
pub fn preference_set(key: String, value: bool) -> PreferenceResponse {
    let key = match parse_preference_key(&key) {
        Ok(key) => key,
        Err(response) => return response,
    };
    match with_preference_store(|store| store.set(key, value)) {
        Ok(()) => PreferenceResponse {
            ok: true,
            value,
            message: "Preference saved.".to_string(),
        },
        Err(err) => PreferenceResponse {
            ok: false,
            value: key.default_value(),
            message: format!("preference_set failed: {err}"),
        },
    }
}

impl CatalogLoadResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            imported: 0,
            total: 0,
            message: message.into(),
        }
    }
}

fn catalog_paths() -> &'static CatalogPaths {
    CATALOG_PATHS.get_or_init(CatalogPaths::from_env)
}

fn with_quote_store<T>(f: impl FnOnce(&SqliteQuoteStore) -> StoreResult<T>) -> Result<T, String> {
    let store = SqliteQuoteStore::open(&catalog_paths().db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error store=quotes error={err}");
        format!("catalog DB open failed: {err}")
    })?;
    f(&store).map_err(|err| err.to_string())
}

fn with_preference_store<T>(
    f: impl FnOnce(&SqlitePreferenceStore) -> StoreResult<T>,
) -> Result<T, String> {
    let store = SqlitePreferenceStore::open(&catalog_paths().db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error store=preferences error={err}");
        format!("preference DB open failed: {err}")
    })?;
    f(&store).map_err(|err| err.to_string())
}

fn parse_query(filter: &str, value: Option<String>) -> Result<QuoteQuery, String> {
    let value = value.map(|raw| raw.trim().to_string()).filter(|raw| !raw.is_empty());
    match (filter.trim().to_ascii_lowercase().as_str(), value) {
        ("all", _) => Ok(QuoteQuery::All),
        ("favorites", _) => Ok(QuoteQuery::Favorites),
        ("category", Some(name)) => Ok(QuoteQuery::Category(name)),
        ("work", Some(title)) => Ok(QuoteQuery::Work(title)),
        ("category" | "work", None) => Err(format!("filter `{filter}` requires a value")),
        (other, _) => Err(format!("unsupported filter `{other}`")),
    }
}

fn parse_preference_key(raw: &str) -> Result<PreferenceKey, PreferenceResponse> {
    PreferenceKey::from_storage_key(raw.trim()).ok_or_else(|| PreferenceResponse {
        ok: false,
        value: false,
        message: format!("unknown preference `{}`", raw.trim()),
    })
}

fn detail_response(operation: &str, result: Result<Option<Quote>, String>) -> QuoteDetailResponse {
    match result {
        Ok(Some(quote)) => QuoteDetailResponse {
            item: Some(to_quote_item(quote)),
            message: String::new(),
        },
        Ok(None) => QuoteDetailResponse {
            item: None,
            message: "Quote not found.".to_string(),
        },
        Err(err) => QuoteDetailResponse {
            item: None,
            message: format!("{operation} failed: {err}"),
        },
    }
}

fn to_quote_item(quote: Quote) -> QuoteItem {
    QuoteItem {
        id: quote.id,
        number: quote.number,
        category: quote.category,
        text: quote.text,
        work: quote.work,
        year: quote.year,
        tags: quote.tags,
        context: quote.context,
        popularity: quote.popularity,
        reference: quote.reference,
        is_favorite: quote.is_favorite,
    }
}

fn to_category_item(category: Category) -> CategoryItem {
    CategoryItem {
        name: category.name,
        quote_count: saturating_u32(category.quote_count as u64),
        icon: category.icon,
    }
}

fn saturating_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
