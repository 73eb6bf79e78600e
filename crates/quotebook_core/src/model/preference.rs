//! Preference keys and their documented defaults.

/// The two persisted user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// Dark theme enabled. Unset means "follow the system".
    DarkMode,
    /// Daily reminder notification enabled.
    DailyNotification,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 2] = [Self::DarkMode, Self::DailyNotification];

    /// Fixed row key in the `preferences` table.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::DarkMode => "dark_mode",
            Self::DailyNotification => "daily_notification",
        }
    }

    pub fn from_storage_key(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.storage_key() == value)
    }

    /// Value reported when the key was never written.
    pub fn default_value(self) -> bool {
        match self {
            Self::DarkMode => false,
            Self::DailyNotification => true,
        }
    }
}
