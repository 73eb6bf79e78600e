use quotebook_core::{PreferenceKey, PreferenceStore, SqlitePreferenceStore};

#[test]
fn unset_keys_report_their_defaults() {
    let store = SqlitePreferenceStore::open_in_memory().unwrap();

    assert_eq!(store.stored(PreferenceKey::DarkMode).unwrap(), None);
    assert!(!store.get(PreferenceKey::DarkMode).unwrap());
    assert!(store.get(PreferenceKey::DailyNotification).unwrap());
}

#[test]
fn toggling_twice_restores_the_original_value() {
    let store = SqlitePreferenceStore::open_in_memory().unwrap();
    let original = store.get(PreferenceKey::DarkMode).unwrap();

    store.set(PreferenceKey::DarkMode, !original).unwrap();
    assert_eq!(store.get(PreferenceKey::DarkMode).unwrap(), !original);
    store.set(PreferenceKey::DarkMode, original).unwrap();
    assert_eq!(store.get(PreferenceKey::DarkMode).unwrap(), original);
    assert_eq!(store.stored(PreferenceKey::DarkMode).unwrap(), Some(original));
}

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotebook.sqlite3");

    let store = SqlitePreferenceStore::open(&path).unwrap();
    store.set(PreferenceKey::DarkMode, true).unwrap();
    store.set(PreferenceKey::DailyNotification, false).unwrap();
    drop(store);

    let reopened = SqlitePreferenceStore::open(&path).unwrap();
    assert!(reopened.get(PreferenceKey::DarkMode).unwrap());
    assert!(!reopened.get(PreferenceKey::DailyNotification).unwrap());
}

#[test]
fn subscribers_see_current_value_then_changes() {
    let store = SqlitePreferenceStore::open_in_memory().unwrap();
    let dark_mode = store.subscribe(PreferenceKey::DarkMode).unwrap();
    let notifications = store.subscribe(PreferenceKey::DailyNotification).unwrap();

    assert_eq!(dark_mode.try_recv(), Some(false));
    assert_eq!(notifications.try_recv(), Some(true));

    store.set(PreferenceKey::DarkMode, true).unwrap();
    assert_eq!(dark_mode.try_recv(), Some(true));
    assert_eq!(notifications.latest(), Some(true));

    drop(dark_mode);
    store.set(PreferenceKey::DailyNotification, false).unwrap();
    assert_eq!(notifications.latest(), Some(false));
}

#[test]
fn storage_keys_round_trip() {
    for key in PreferenceKey::ALL {
        assert_eq!(PreferenceKey::from_storage_key(key.storage_key()), Some(key));
    }
    assert_eq!(PreferenceKey::from_storage_key("font_size"), None);
}
