//! The fixed list of headline categories.
//!
//! Defined once and shared by the category tabs in the UI, the feed
//! controller, configuration parsing and the NewsAPI query string.

use std::fmt;
use std::str::FromStr;

/// A NewsAPI `top-headlines` category, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    General,
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    /// All categories in the order the tabs are shown.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    /// Human-readable tab label.
    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Sports => "Sports",
            Category::Technology => "Technology",
        }
    }

    /// Value for the `category` query parameter.  NewsAPI only accepts the
    /// lowercase spelling.
    pub fn api_value(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Next tab to the right, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Next tab to the left, wrapping around.
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category `{0}` (expected one of: general, business, entertainment, health, science, sports, technology)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.api_value().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_general() {
        assert_eq!(Category::default(), Category::General);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Business".parse::<Category>().unwrap(), Category::Business);
        assert_eq!(" sports ".parse::<Category>().unwrap(), Category::Sports);
        assert!("weather".parse::<Category>().is_err());
    }

    #[test]
    fn api_values_are_lowercase_labels() {
        for c in Category::ALL {
            assert_eq!(c.api_value(), c.label().to_lowercase());
        }
    }

    #[test]
    fn next_and_previous_wrap() {
        assert_eq!(Category::Technology.next(), Category::General);
        assert_eq!(Category::General.previous(), Category::Technology);
        assert_eq!(Category::Health.next(), Category::Science);
    }
}
