//! Preload Module
//!
//! Key layout for a cached collection and the records that populate it.

use serde::Serialize;
use serde_json::{json, Value};

use crate::cache::compose;

// == Record ==
/// A record that can be bulk-loaded into the cache.
pub trait Record: Serialize {
    /// Identifier used to build the per-subject key.
    fn subject_id(&self) -> String;

    /// Aggregate view over the loaded records, stored under the schema's
    /// statistics key.
    fn summarize(records: &[&Self]) -> Value
    where
        Self: Sized,
    {
        json!({ "count": records.len() })
    }
}

// == Key Schema ==
/// Which keys hold the subject records, the full collection and the
/// aggregate view derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySchema {
    /// Category of per-subject keys (`"<category>:<subject>"`)
    pub subject_category: String,
    /// Key holding the full collection
    pub collection_key: String,
    /// Key holding the aggregate statistics
    pub stats_key: String,
}

impl KeySchema {
    /// Layout `<category>:<id>`, `<category>:all`, `stats:<category>`.
    pub fn for_category(category: &str) -> Self {
        Self {
            subject_category: category.to_string(),
            collection_key: compose(category, "all"),
            stats_key: compose("stats", category),
        }
    }

    pub fn subject_key(&self, subject_id: &str) -> String {
        compose(&self.subject_category, subject_id)
    }

    /// Substrings that cover every view a change to `subject_id` can stale.
    pub fn invalidation_patterns(&self, subject_id: &str) -> [String; 3] {
        [
            self.subject_key(subject_id),
            self.collection_key.clone(),
            self.stats_key.clone(),
        ]
    }
}

impl Default for KeySchema {
    fn default() -> Self {
        Self::for_category("conversion")
    }
}
