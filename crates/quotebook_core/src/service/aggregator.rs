//! Category and work projections over a quote snapshot.
//!
//! Both functions are pure and hold no state between calls; the store
//! re-runs them on every published snapshot.

use crate::model::category::{category_icon, Category};
use crate::model::quote::Quote;
use std::collections::{BTreeSet, HashMap};

/// Groups quotes by exact category label.
///
/// Ordering: descending by count; equal counts keep first-seen order.
pub fn aggregate_categories(quotes: &[Quote]) -> Vec<Category> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<Category> = Vec::new();

    for quote in quotes {
        match slots.get(quote.category.as_str()) {
            Some(&slot) => categories[slot].quote_count += 1,
            None => {
                slots.insert(quote.category.as_str(), categories.len());
                categories.push(Category {
                    name: quote.category.clone(),
                    quote_count: 1,
                    icon: category_icon(&quote.category).to_string(),
                });
            }
        }
    }

    // `sort_by` is stable, which preserves first-seen order for ties.
    categories.sort_by(|left, right| right.quote_count.cmp(&left.quote_count));
    categories
}

/// Distinct work titles in ascending order.
pub fn collect_works(quotes: &[Quote]) -> Vec<String> {
    quotes
        .iter()
        .map(|quote| quote.work.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
