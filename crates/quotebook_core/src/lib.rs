//! Core domain logic for the Quotebook catalog.
//! This crate owns persistence, live state and every business rule; hosts
//! only render what it publishes.

pub mod config;
pub mod dataset;
pub mod db;
pub mod live;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CatalogPaths;
pub use dataset::{
    parse_quote_dataset, DatasetError, DatasetResult, JsonQuoteDataset, QuoteDatasetSource,
    WorksCatalog, WorksDocuments,
};
pub use live::{LiveHub, LiveValue, Subscription};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{category_icon, Category, FALLBACK_CATEGORY_ICON};
pub use model::preference::PreferenceKey;
pub use model::quote::{NewQuote, Quote, QuoteId, UNKNOWN_YEAR};
pub use repo::quote_repo::{QuoteQuery, QuoteRepository, SqliteQuoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::aggregator::{aggregate_categories, collect_works};
pub use service::chat::{
    ChatError, ChatMessage, ChatPersona, ChatRole, ChatSession, ChatTransport, ChatTurn,
};
pub use service::preference_store::{PreferenceStore, SqlitePreferenceStore};
pub use service::quote_store::{ImportOutcome, QuoteCatalog, SqliteQuoteStore};
pub use service::reminder::{LogOnlyReminderScheduler, ReminderScheduler};
pub use service::selection::{quote_of_the_day, random_quote};
pub use service::view_model::{LoadState, QuoteViewModel};
pub use service::{StoreError, StoreResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
