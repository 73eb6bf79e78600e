//! Presentation-facing composition of the catalog and preferences.
//!
//! # Responsibility
//! - Trigger the one-time import and expose its outcome as live state.
//! - Expose every list, summary and flag the screens render as a live
//!   sequence.
//! - Translate user commands into store writes.
//!
//! # Invariants
//! - The view model keeps no copy of quote records; every read goes
//!   through the catalog.
//! - A failed import surfaces as `LoadState::Failed`, never as an empty
//!   `Ready` catalog.
//! - The reminder scheduler is told about the notification flag only after
//!   the flag is persisted.

use super::aggregator::{aggregate_categories, collect_works};
use super::preference_store::PreferenceStore;
use super::quote_store::{ImportOutcome, QuoteCatalog};
use super::reminder::ReminderScheduler;
use super::selection;
use super::StoreResult;
use crate::dataset::QuoteDatasetSource;
use crate::live::{LiveValue, Subscription};
use crate::model::category::Category;
use crate::model::preference::PreferenceKey;
use crate::model::quote::{Quote, QuoteId};
use crate::repo::quote_repo::QuoteQuery;
use chrono::{Local, NaiveDate};
use log::{info, warn};

/// Catalog loading status shown by the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready { total: u64 },
    /// Import failed; the message is safe to show as an error affordance.
    Failed { message: String },
}

/// View model over injected catalog, preferences and reminder handles.
pub struct QuoteViewModel<C, P, R> {
    catalog: C,
    preferences: P,
    reminders: R,
    load_state: LiveValue<LoadState>,
    selected: LiveValue<Option<Quote>>,
}

impl<C, P, R> QuoteViewModel<C, P, R>
where
    C: QuoteCatalog,
    P: PreferenceStore,
    R: ReminderScheduler,
{
    /// Wires the view model, imports the bundled dataset if the catalog is
    /// empty and aligns the reminder scheduler with the stored flag.
    ///
    /// Never fails: import problems are reported through [`Self::load_state`].
    pub fn new<D>(catalog: C, preferences: P, reminders: R, dataset: &D) -> Self
    where
        D: QuoteDatasetSource + ?Sized,
    {
        let view_model = Self {
            catalog,
            preferences,
            reminders,
            load_state: LiveValue::new(LoadState::Loading),
            selected: LiveValue::new(None),
        };
        // The outcome is mirrored into `load_state`.
        let _ = view_model.load(dataset);
        view_model.sync_reminder();
        view_model
    }

    /// Runs the import-if-empty step and publishes the resulting state.
    pub fn load<D>(&self, dataset: &D) -> StoreResult<ImportOutcome>
    where
        D: QuoteDatasetSource + ?Sized,
    {
        self.load_state.set(LoadState::Loading);
        let outcome = self
            .catalog
            .import_if_empty_with(dataset)
            .and_then(|outcome| Ok((outcome, self.catalog.count()?)));

        match outcome {
            Ok((outcome, total)) => {
                self.load_state.set(LoadState::Ready { total });
                Ok(outcome)
            }
            Err(err) => {
                warn!("event=catalog_load module=view_model status=error error={err}");
                self.load_state.set(LoadState::Failed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn load_state(&self) -> Subscription<LoadState> {
        self.load_state.subscribe()
    }

    pub fn current_load_state(&self) -> LoadState {
        self.load_state.get()
    }

    pub fn all_quotes(&self) -> StoreResult<Subscription<Vec<Quote>>> {
        self.catalog.all()
    }

    pub fn favorite_quotes(&self) -> StoreResult<Subscription<Vec<Quote>>> {
        self.catalog.favorites()
    }

    /// Category overview, recomputed on every catalog change.
    pub fn categories(&self) -> StoreResult<Subscription<Vec<Category>>> {
        self.catalog.observe(QuoteQuery::All, aggregate_categories)
    }

    /// Distinct work titles, recomputed on every catalog change.
    pub fn works(&self) -> StoreResult<Subscription<Vec<String>>> {
        self.catalog.observe(QuoteQuery::All, collect_works)
    }

    pub fn quotes_in_category(&self, name: &str) -> StoreResult<Subscription<Vec<Quote>>> {
        self.catalog.by_category(name)
    }

    pub fn quotes_from_work(&self, name: &str) -> StoreResult<Subscription<Vec<Quote>>> {
        self.catalog.by_work(name)
    }

    pub fn dark_mode(&self) -> StoreResult<Subscription<bool>> {
        self.preferences.subscribe(PreferenceKey::DarkMode)
    }

    pub fn notifications_enabled(&self) -> StoreResult<Subscription<bool>> {
        self.preferences.subscribe(PreferenceKey::DailyNotification)
    }

    pub fn selected_quote(&self) -> Subscription<Option<Quote>> {
        self.selected.subscribe()
    }

    /// Theme to render: the stored choice, or `system_default` when the
    /// user never picked one.
    pub fn dark_mode_or_system(&self, system_default: bool) -> StoreResult<bool> {
        Ok(self
            .preferences
            .stored(PreferenceKey::DarkMode)?
            .unwrap_or(system_default))
    }

    /// Flips the favorite flag of `quote` as the caller last saw it.
    pub fn toggle_favorite(&self, quote: &Quote) -> StoreResult<()> {
        self.catalog.set_favorite(quote.id, !quote.is_favorite)
    }

    /// Flips and persists the theme flag; returns the new value.
    pub fn toggle_theme(&self) -> StoreResult<bool> {
        let next = !self.preferences.get(PreferenceKey::DarkMode)?;
        self.preferences.set(PreferenceKey::DarkMode, next)?;
        Ok(next)
    }

    /// Persists the notification flag, then arms or disarms the reminder.
    pub fn toggle_notifications(&self, enabled: bool) -> StoreResult<()> {
        self.preferences.set(PreferenceKey::DailyNotification, enabled)?;
        self.apply_reminder(enabled);
        Ok(())
    }

    /// Resolves `id` for the detail screen. A missing id clears the
    /// selection and returns `None`.
    pub fn select_quote(&self, id: QuoteId) -> StoreResult<Option<Quote>> {
        let found = self.catalog.by_id(id)?;
        self.selected.set(found.clone());
        Ok(found)
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
    }

    /// Quote of the day for the local calendar date.
    pub fn quote_of_the_day(&self) -> StoreResult<Option<Quote>> {
        self.quote_of_the_day_on(Local::now().date_naive())
    }

    pub fn quote_of_the_day_on(&self, date: NaiveDate) -> StoreResult<Option<Quote>> {
        let quotes = self.catalog.snapshot(&QuoteQuery::All)?;
        Ok(selection::quote_of_the_day(&quotes, date).cloned())
    }

    pub fn random_quote(&self) -> StoreResult<Option<Quote>> {
        let quotes = self.catalog.snapshot(&QuoteQuery::All)?;
        Ok(selection::random_quote(&quotes, &mut rand::thread_rng()).cloned())
    }

    fn sync_reminder(&self) {
        match self.preferences.get(PreferenceKey::DailyNotification) {
            Ok(enabled) => self.apply_reminder(enabled),
            Err(err) => {
                warn!("event=reminder_sync module=view_model status=error error={err}");
            }
        }
    }

    fn apply_reminder(&self, enabled: bool) {
        if enabled {
            self.reminders.arm_daily_reminder();
        } else {
            self.reminders.disarm_daily_reminder();
        }
        info!("event=reminder_sync module=view_model status=ok enabled={enabled}");
    }
}
