//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable that wires the catalog end to end.
//! - Keep output deterministic for quick local sanity checks.

use log::warn;
use quotebook_core::config::DATASET_PATH_ENV;
use quotebook_core::{
    core_version, default_log_level, init_logging, ping, CatalogPaths, JsonQuoteDataset,
    LoadState, LogOnlyReminderScheduler, QuoteViewModel, SqlitePreferenceStore,
    SqliteQuoteStore,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("quotebook_core ping={}", ping());
    println!("quotebook_core version={}", core_version());

    let paths = CatalogPaths::from_env();
    if let Err(err) = init_logging(default_log_level(), &paths.log_dir.to_string_lossy()) {
        eprintln!("logging disabled: {err}");
    }

    let dataset = match dataset_source(&paths) {
        Ok(dataset) => dataset,
        Err(message) => {
            warn!("event=cli_start module=cli status=error reason=no_dataset");
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let (quotes, preferences) = match (
        SqliteQuoteStore::open(&paths.db_path),
        SqlitePreferenceStore::open(&paths.db_path),
    ) {
        (Ok(quotes), Ok(preferences)) => (quotes, preferences),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("cannot open {}: {err}", paths.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let view_model = QuoteViewModel::new(quotes, preferences, LogOnlyReminderScheduler, &dataset);

    match view_model.current_load_state() {
        LoadState::Ready { total } => println!("catalog quotes={total}"),
        LoadState::Failed { message } => {
            eprintln!("catalog load failed: {message}");
            return ExitCode::FAILURE;
        }
        LoadState::Loading => println!("catalog loading"),
    }

    if let Some(categories) = view_model.categories().ok().and_then(|live| live.recv()) {
        for category in categories {
            println!(
                "category {} {} quotes={}",
                category.icon, category.name, category.quote_count
            );
        }
    }

    match view_model.quote_of_the_day() {
        Ok(Some(quote)) => println!(
            "quote_of_the_day \"{}\" ({}, {})",
            quote.text, quote.work, quote.year
        ),
        Ok(None) => println!("quote_of_the_day none"),
        Err(err) => eprintln!("quote_of_the_day failed: {err}"),
    }
    ExitCode::SUCCESS
}

/// The quote export to seed from; an unset path is an error rather than an
/// empty catalog.
fn dataset_source(paths: &CatalogPaths) -> Result<JsonQuoteDataset, String> {
    paths
        .dataset_path
        .as_ref()
        .map(JsonQuoteDataset::from_path)
        .ok_or_else(|| {
            format!("no dataset configured: set {DATASET_PATH_ENV} to the quote export")
        })
}
