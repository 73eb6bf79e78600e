//! Derived category summary.

use serde::{Deserialize, Serialize};

/// Glyph used when a category name has no entry in the icon table.
pub const FALLBACK_CATEGORY_ICON: &str = "💡";

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("wisdom", "🦉"),
    ("freedom", "🕊️"),
    ("justice", "⚖️"),
    ("religion", "🙏"),
    ("philosophy", "🤔"),
    ("politics", "🏛️"),
    ("science", "🔬"),
    ("education", "📚"),
    ("humanity", "🤝"),
    ("tolerance", "🌈"),
    ("reason", "🧠"),
    ("truth", "✨"),
    ("love", "❤️"),
    ("work", "💼"),
    ("morality", "🧭"),
    ("society", "👥"),
    ("government", "🏢"),
    ("history", "📜"),
    ("death", "🕯️"),
    ("women", "👩"),
    ("men", "👨"),
    ("success", "🏆"),
    ("nature", "🌿"),
    ("art", "🎨"),
    ("time", "⏳"),
    ("happiness", "😊"),
    ("money", "💰"),
    ("knowledge", "📖"),
    ("friendship", "🤗"),
    ("courage", "🦁"),
    ("freedom of speech", "🗣️"),
    ("war & peace", "☮️"),
];

/// One row of the category overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Exact category label shared by the grouped quotes.
    pub name: String,
    pub quote_count: usize,
    pub icon: String,
}

/// Looks up the icon for a category, ignoring case.
pub fn category_icon(name: &str) -> &'static str {
    let lowered = name.to_lowercase();
    CATEGORY_ICONS
        .iter()
        .find(|(key, _)| *key == lowered)
        .map_or(FALLBACK_CATEGORY_ICON, |(_, icon)| *icon)
}

#[cfg(test)]
mod tests {
    use super::{category_icon, FALLBACK_CATEGORY_ICON};

    #[test]
    fn icon_lookup_is_case_insensitive() {
        assert_eq!(category_icon("SCIENCE"), category_icon("science"));
        assert_eq!(category_icon("War & Peace"), "☮️");
    }

    #[test]
    fn unknown_category_uses_fallback() {
        assert_eq!(category_icon("Astrology"), FALLBACK_CATEGORY_ICON);
        assert_eq!(category_icon(""), FALLBACK_CATEGORY_ICON);
    }
}
