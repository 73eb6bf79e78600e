//! One-shot picks from a quote snapshot.

use crate::model::quote::Quote;
use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

/// Deterministic quote for a calendar day: `quotes[day_of_year % len]`.
///
/// `day_of_year` is 1-based (January 1st is 1). Returns `None` for an empty
/// snapshot.
pub fn quote_of_the_day(quotes: &[Quote], date: NaiveDate) -> Option<&Quote> {
    if quotes.is_empty() {
        return None;
    }
    let index = date.ordinal() as usize % quotes.len();
    quotes.get(index)
}

/// Uniform pick from the snapshot, `None` when it is empty.
pub fn random_quote<'q, R: Rng + ?Sized>(quotes: &'q [Quote], rng: &mut R) -> Option<&'q Quote> {
    quotes.choose(rng)
}
