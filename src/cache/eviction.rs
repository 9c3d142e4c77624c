//! Eviction Module
//!
//! Chooses which entries of a full category to drop.

use crate::cache::{CacheEntry, EvictionStrategy};

impl EvictionStrategy {
    // == Select Victims ==
    /// Returns up to `count` keys from `candidates`, first-to-evict first.
    ///
    /// Ordering per strategy:
    /// - `Lru`: `last_accessed_at`, then access order
    /// - `Lfu`: `access_count`, then insertion order
    /// - `Fifo`: `inserted_at`, then insertion order
    ///
    /// The logical sequence numbers make the result reproducible even when
    /// timestamps compare equal.
    pub fn select_victims<'a, I>(&self, candidates: I, count: usize) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a String, &'a CacheEntry)>,
    {
        let mut ranked: Vec<(&String, &CacheEntry)> = candidates.into_iter().collect();

        match self {
            Self::Lru => {
                ranked.sort_by_key(|(_, e)| (e.last_accessed_at, e.accessed_seq));
            }
            Self::Lfu => {
                ranked.sort_by_key(|(_, e)| (e.access_count, e.inserted_seq));
            }
            Self::Fifo => {
                ranked.sort_by_key(|(_, e)| (e.inserted_at, e.inserted_seq));
            }
        }

        ranked
            .into_iter()
            .take(count)
            .map(|(key, _)| key.clone())
            .collect()
    }
}
