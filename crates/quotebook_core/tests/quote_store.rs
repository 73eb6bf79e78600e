use quotebook_core::{
    ImportOutcome, JsonQuoteDataset, NewQuote, QuoteCatalog, QuoteDatasetSource, QuoteQuery,
    SqliteQuoteStore, StoreError, UNKNOWN_YEAR,
};
use serde_json::json;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

fn sample_dataset() -> Vec<NewQuote> {
    let mut relativity = NewQuote::new("Science", "Imagination is more important", "Interview");
    relativity.number = Some(1);
    relativity.year = "1929".to_string();
    relativity.tags = vec!["imagination".to_string(), "knowledge".to_string()];
    relativity.context = "Saturday Evening Post".to_string();
    relativity.popularity = "High".to_string();
    relativity.reference = "Viereck, 1929".to_string();

    vec![
        relativity,
        NewQuote::new("Wisdom", "Learn from yesterday", "Relativity"),
        NewQuote::new("Science", "God does not play dice", "Letters"),
        NewQuote::new("Love", "Gravitation is not responsible", "Letters"),
    ]
}

#[test]
fn import_assigns_sequential_ids_and_is_idempotent() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    let dataset = sample_dataset();

    let first = store.import_if_empty(&dataset).unwrap();
    assert_eq!(first, ImportOutcome::Imported { count: 4 });

    let all = store.snapshot(&QuoteQuery::All).unwrap();
    assert_eq!(all.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(all[1].text, "Learn from yesterday");

    let second = store.import_if_empty(&dataset).unwrap();
    assert_eq!(second, ImportOutcome::AlreadyPopulated { existing: 4 });
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn by_id_returns_imported_record_unchanged() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    store.import_if_empty(&sample_dataset()).unwrap();

    for quote in store.snapshot(&QuoteQuery::All).unwrap() {
        assert_eq!(store.by_id(quote.id).unwrap(), Some(quote));
    }

    let first = store.by_id(1).unwrap().unwrap();
    assert_eq!(first.tags, vec!["imagination", "knowledge"]);
    assert_eq!(first.number, Some(1));
    assert_eq!(first.reference, "Viereck, 1929");
    assert!(!first.is_favorite);
}

#[test]
fn by_id_on_unknown_id_is_none() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    store.import_if_empty(&sample_dataset()).unwrap();
    assert_eq!(store.by_id(999).unwrap(), None);
}

#[test]
fn favorite_round_trip_is_visible_in_favorites() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    store.import_if_empty(&sample_dataset()).unwrap();

    store.set_favorite(3, true).unwrap();
    store.set_favorite(3, true).unwrap();
    let favorites = store.snapshot(&QuoteQuery::Favorites).unwrap();
    assert_eq!(favorites.iter().map(|q| q.id).collect::<Vec<_>>(), vec![3]);

    store.set_favorite(3, false).unwrap();
    assert!(store.snapshot(&QuoteQuery::Favorites).unwrap().is_empty());
}

#[test]
fn set_favorite_on_unknown_id_is_a_silent_no_op() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    store.import_if_empty(&sample_dataset()).unwrap();

    store.set_favorite(404, true).unwrap();
    assert!(store.snapshot(&QuoteQuery::Favorites).unwrap().is_empty());
}

#[test]
fn category_and_work_filters_are_exact_matches() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    store.import_if_empty(&sample_dataset()).unwrap();

    let science = store
        .snapshot(&QuoteQuery::Category("Science".to_string()))
        .unwrap();
    assert_eq!(science.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 3]);
    assert!(store
        .snapshot(&QuoteQuery::Category("science".to_string()))
        .unwrap()
        .is_empty());

    let letters = store.by_work("Letters").unwrap().recv().unwrap();
    assert_eq!(letters.iter().map(|q| q.id).collect::<Vec<_>>(), vec![3, 4]);
}

#[test]
fn malformed_dataset_leaves_store_empty_and_reports_error() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    let broken = JsonQuoteDataset::from_json(
        r#"[{"Category": "Science", "Quote": "q", "Work": "w", "Year": "1905"},
            {"Category": "Science", "Quote": 12}]"#,
    );

    let err = store.import_if_empty_with(&broken).unwrap_err();
    assert!(matches!(err, StoreError::Dataset(_)));
    assert_eq!(store.count().unwrap(), 0);

    let outcome = store.import_if_empty(&sample_dataset()).unwrap();
    assert_eq!(outcome, ImportOutcome::Imported { count: 4 });
}

#[test]
fn populated_store_never_reads_the_dataset_again() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    store.import_if_empty(&sample_dataset()).unwrap();

    let missing = JsonQuoteDataset::from_path("/definitely/not/here/quotes.json");
    let outcome = store.import_if_empty_with(&missing).unwrap();
    assert_eq!(outcome, ImportOutcome::AlreadyPopulated { existing: 4 });
}

#[test]
fn imported_tags_are_stored_verbatim() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    let dataset = JsonQuoteDataset::from_json(
        json!([
            {"Category": "Peace", "Quote": "Peace cannot be kept by force", "Work": "Speech",
             "Year": "1930", "Tags": ["war; peace", "science, religion", "space | time"]}
        ])
        .to_string(),
    );
    let parsed = dataset.load_quotes().unwrap();

    store.import_if_empty_with(&dataset).unwrap();
    let stored = store.by_id(1).unwrap().unwrap();
    assert_eq!(stored.tags, parsed[0].tags);
    assert_eq!(
        stored.tags,
        vec!["war; peace", "science, religion", "space | time"]
    );
    assert_eq!(store.snapshot(&QuoteQuery::All).unwrap()[0].tags, parsed[0].tags);
}

#[test]
fn missing_year_is_imported_as_unknown() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    let dataset = JsonQuoteDataset::from_json(
        r#"[{"Category": "Wisdom", "Quote": "q1", "Work": "Letters"},
            {"Category": "Wisdom", "Quote": "q2", "Work": "Letters", "Year": null}]"#,
    );

    store.import_if_empty_with(&dataset).unwrap();
    let all = store.snapshot(&QuoteQuery::All).unwrap();
    assert!(all.iter().all(|quote| quote.year == UNKNOWN_YEAR));
}

#[test]
fn json_dataset_skips_header_rows() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    let dataset = JsonQuoteDataset::from_json(
        json!([
            {"Number": "Number", "Category": "Category", "Quote": "Quote", "Work": "Work",
             "Year": "Year", "Tags": "Tags", "Context": "Context", "Popularity": "Popularity",
             "Reference": "Reference"},
            {"Number": 1, "Category": "Science", "Quote": "E = mc^2", "Work": "Annus Mirabilis",
             "Year": 1905, "Tags": "physics, energy", "Context": "", "Popularity": "High",
             "Reference": "Annalen der Physik"},
            {"Number": null, "Category": "Wisdom", "Quote": "Stay curious", "Work": "Letters",
             "Year": "Unknown", "Tags": "", "Context": "Letter to a student",
             "Popularity": "Medium", "Reference": ""}
        ])
        .to_string(),
    );

    store.import_if_empty_with(&dataset).unwrap();
    let all = store.snapshot(&QuoteQuery::All).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].year, "1905");
    assert_eq!(all[0].tags, vec!["physics", "energy"]);
    assert_eq!(all[1].number, None);
    assert!(all[1].tags.is_empty());
    assert!(!all[1].has_known_year());
}

#[test]
fn live_sequence_replays_then_follows_changes() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    let all = store.all().unwrap();
    let favorites = store.favorites().unwrap();

    assert_eq!(all.try_recv(), Some(Vec::new()));
    assert_eq!(favorites.try_recv(), Some(Vec::new()));

    store.import_if_empty(&sample_dataset()).unwrap();
    assert_eq!(all.try_recv().unwrap().len(), 4);

    store.set_favorite(2, true).unwrap();
    let favorites_now = favorites.latest().unwrap();
    assert_eq!(favorites_now.iter().map(|q| q.id).collect::<Vec<_>>(), vec![2]);
    assert!(all.latest().unwrap()[1].is_favorite);

    let late = store.favorites().unwrap();
    assert_eq!(late.try_recv().unwrap().len(), 1);
}

#[test]
fn unsubscribing_one_reader_leaves_others_running() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    store.import_if_empty(&sample_dataset()).unwrap();

    let first = store.favorites().unwrap();
    let second = store.favorites().unwrap();
    assert_eq!(store.subscriber_count(), 2);

    first.unsubscribe();
    assert_eq!(store.subscriber_count(), 1);

    store.set_favorite(1, true).unwrap();
    assert_eq!(second.latest().unwrap().len(), 1);
}

#[test]
fn concurrent_toggles_on_distinct_ids_are_both_applied() {
    let store = Arc::new(SqliteQuoteStore::open_in_memory().unwrap());
    store.import_if_empty(&sample_dataset()).unwrap();
    let favorites = store.favorites().unwrap();
    let barrier = Arc::new(Barrier::new(2));

    let handles = [1_i64, 4]
        .into_iter()
        .map(|id| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.set_favorite(id, true).unwrap();
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().unwrap();
    }

    let ids = store
        .snapshot(&QuoteQuery::Favorites)
        .unwrap()
        .iter()
        .map(|q| q.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(favorites.latest().unwrap().len(), 2);
}

#[test]
fn concurrent_toggles_on_same_id_converge() {
    let store = Arc::new(SqliteQuoteStore::open_in_memory().unwrap());
    store.import_if_empty(&sample_dataset()).unwrap();
    let barrier = Arc::new(Barrier::new(2));

    let handles = [true, false]
        .into_iter()
        .map(|value| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.set_favorite(2, value).unwrap();
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().unwrap();
    }

    let quote = store.by_id(2).unwrap().unwrap();
    let favorites = store.snapshot(&QuoteQuery::Favorites).unwrap();
    assert_eq!(favorites.iter().any(|q| q.id == 2), quote.is_favorite);
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn concurrent_starts_on_one_file_import_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotebook.sqlite3");
    // Create the schema up front so the starters race only on the import.
    drop(SqliteQuoteStore::open(&path).unwrap());

    let barrier = Arc::new(Barrier::new(3));
    let handles = (0..3)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let store = SqliteQuoteStore::open(&path).unwrap();
                barrier.wait();
                store.import_if_empty(&sample_dataset()).unwrap()
            })
        })
        .collect::<Vec<_>>();
    let outcomes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();

    let imported = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, ImportOutcome::Imported { .. }))
        .count();
    assert_eq!(imported, 1);

    let store = SqliteQuoteStore::open(&path).unwrap();
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn subscription_stops_when_store_is_dropped() {
    let store = SqliteQuoteStore::open_in_memory().unwrap();
    let all = store.all().unwrap();
    assert_eq!(all.try_recv(), Some(Vec::new()));

    drop(store);
    assert_eq!(all.recv_timeout(Duration::from_millis(10)), None);
    assert_eq!(all.recv(), None);
}
