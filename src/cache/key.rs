//! Cache Key Module
//!
//! Splits category-prefixed keys (`"category:subject"`) at the API boundary.

use std::fmt;

// == Constants ==
/// Separator between the category prefix and the subject identifier.
pub const KEY_DELIMITER: char = ':';

// == Cache Key ==
/// Borrowed, parsed view of a cache key.
///
/// The category is the substring before the first [`KEY_DELIMITER`]. A key
/// without a delimiter is its own category and has no subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey<'a> {
    raw: &'a str,
    category: &'a str,
    subject: Option<&'a str>,
}

impl<'a> CacheKey<'a> {
    // == Parse ==
    /// Parses a raw key. Never fails; the subject is never interpreted.
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once(KEY_DELIMITER) {
            Some((category, subject)) => Self {
                raw,
                category,
                subject: Some(subject),
            },
            None => Self {
                raw,
                category: raw,
                subject: None,
            },
        }
    }

    /// Category prefix used for configuration lookup.
    pub fn category(&self) -> &'a str {
        self.category
    }

    /// Everything after the first delimiter, if any.
    pub fn subject(&self) -> Option<&'a str> {
        self.subject
    }

    /// The full key as given.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }
}

impl fmt::Display for CacheKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

// == Utility Functions ==
/// Returns the category prefix of a raw key.
pub fn category_of(key: &str) -> &str {
    CacheKey::parse(key).category()
}

/// Builds `"category:subject"`.
pub fn compose(category: &str, subject: &str) -> String {
    format!("{}{}{}", category, KEY_DELIMITER, subject)
}
