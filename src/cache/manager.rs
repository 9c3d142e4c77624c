//! Cache Manager Module
//!
//! Main cache engine: per-category TTL and capacity, strategy-driven eviction,
//! pattern invalidation and statistics.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};

use crate::cache::{
    category_of, CacheEntry, CacheKey, CacheReport, CacheStats, CategoryConfig, CategoryTable,
    Clock, HotEntry, KeySchema, Record, SystemClock,
};

/// Default length of the hot-entry list in reports.
pub const DEFAULT_TOP_N: usize = 10;

/// One manager shared by every request handler behind a single lock.
pub type SharedCacheManager = Arc<RwLock<CacheManager>>;

// == Cache Manager ==
/// Category-aware cache with lazy TTL expiry and per-category eviction.
#[derive(Debug)]
pub struct CacheManager {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Per-category policy, fixed at construction
    categories: CategoryTable,
    /// Keys touched by preload and invalidate
    schema: KeySchema,
    /// Performance statistics
    stats: CacheStats,
    clock: Arc<dyn Clock>,
    /// Logical tick for insertion/access ordering
    seq: u64,
    top_n: usize,
}

impl CacheManager {
    // == Constructor ==
    /// Creates a manager on the system clock.
    pub fn new(categories: CategoryTable, schema: KeySchema) -> Self {
        Self::with_clock(categories, schema, Arc::new(SystemClock))
    }

    /// Creates a manager on an explicit clock.
    pub fn with_clock(categories: CategoryTable, schema: KeySchema, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            categories,
            schema,
            stats: CacheStats::new(),
            clock,
            seq: 0,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Sets how many entries `stats()` lists as hot.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Wraps the manager for sharing across tasks.
    pub fn into_shared(self) -> SharedCacheManager {
        Arc::new(RwLock::new(self))
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed here and count as both a miss and an
    /// eviction.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        let ttl = self.categories.resolve(category_of(key)).ttl;

        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                trace!(key, "cache miss");
                return None;
            }
            Some(entry) => entry.is_expired(now, ttl),
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_miss();
            self.stats.record_evictions(1);
            self.refresh_snapshot();
            debug!(key, ttl = ?ttl, "cache entry expired");
            return None;
        }

        let seq = self.next_seq();
        let entry = self.entries.get_mut(key)?;
        entry.touch(now, seq);
        let value = entry.value.clone();
        self.stats.record_hit();
        trace!(key, "cache hit");
        Some(value)
    }

    // == Set ==
    /// Stores a value, replacing any previous entry under the same key.
    ///
    /// If the key's category is at capacity, a batch of its entries is
    /// evicted first according to the category's strategy.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let now = self.clock.now();
        let config = self.categories.resolve(category_of(&key)).clone();

        self.make_room(&key, &config, now);

        let seq = self.next_seq();
        self.entries.insert(key, CacheEntry::new(value, now, seq));
        self.refresh_snapshot();
    }

    /// Purges expired entries of `key`'s category, then evicts a batch if the
    /// live count (excluding `key` itself) has reached `max_size`.
    fn make_room(&mut self, key: &str, config: &CategoryConfig, now: Instant) {
        let category = category_of(key);
        let ttl = config.ttl;

        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(k, e)| category_of(k) == category && e.is_expired(now, ttl))
            .map(|(k, _)| k.clone())
            .collect();
        if !expired.is_empty() {
            for k in &expired {
                self.entries.remove(k);
            }
            self.stats.record_evictions(expired.len());
            debug!(category, count = expired.len(), "purged expired entries");
        }

        let live = self
            .entries
            .keys()
            .filter(|k| k.as_str() != key && category_of(k) == category)
            .count();
        if live < config.max_size {
            return;
        }

        let victims = config.strategy.select_victims(
            self.entries
                .iter()
                .filter(|(k, _)| k.as_str() != key && category_of(k) == category),
            config.eviction_batch(),
        );
        for k in &victims {
            self.entries.remove(k);
        }
        self.stats.record_evictions(victims.len());
        debug!(
            category,
            strategy = %config.strategy,
            count = victims.len(),
            max_size = config.max_size,
            "evicted entries at capacity"
        );
    }

    // == Clear ==
    /// Removes every entry, or every entry whose key contains `pattern`.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self, pattern: Option<&str>) -> usize {
        let removed = match pattern {
            None => {
                let count = self.entries.len();
                self.entries.clear();
                count
            }
            Some(pattern) => {
                let before = self.entries.len();
                self.entries.retain(|k, _| !k.contains(pattern));
                before - self.entries.len()
            }
        };

        self.refresh_snapshot();
        info!(pattern = pattern.unwrap_or("*"), removed, "cache cleared");
        removed
    }

    // == Invalidate ==
    /// Drops every view that may hold `subject_id`: its own key, the
    /// collection and the aggregate statistics.
    pub fn invalidate(&mut self, subject_id: &str) -> usize {
        let removed: usize = self
            .schema
            .invalidation_patterns(subject_id)
            .iter()
            .map(|pattern| self.clear(Some(pattern.as_str())))
            .sum();

        info!(subject = subject_id, removed, "subject invalidated");
        removed
    }

    // == Preload ==
    /// Warms the collection key, one key per record and the aggregate key.
    ///
    /// Records that fail to serialize are skipped and left out of both the
    /// collection and the aggregate.
    ///
    /// Bypasses `get`, so hit/miss counters are untouched; insertions still
    /// go through capacity accounting.
    pub fn preload<R: Record>(&mut self, records: &[R]) {
        let mut loaded = Vec::with_capacity(records.len());
        let mut summarized = Vec::with_capacity(records.len());
        for record in records {
            let id = record.subject_id();
            match serde_json::to_value(record) {
                Ok(value) => {
                    let key = self.schema.subject_key(&id);
                    self.set(key, value.clone());
                    loaded.push(value);
                    summarized.push(record);
                }
                Err(e) => warn!(subject = %id, error = %e, "skipping unserializable record"),
            }
        }

        let loaded_count = loaded.len();
        let collection_key = self.schema.collection_key.clone();
        let stats_key = self.schema.stats_key.clone();
        self.set(collection_key, Value::Array(loaded));
        self.set(stats_key, R::summarize(&summarized));

        info!(
            records = loaded_count,
            collection = %self.schema.collection_key,
            "cache preloaded"
        );
    }

    // == Stats ==
    /// Counters plus a fresh snapshot of the table, hot entries and policy.
    pub fn stats(&self) -> CacheReport {
        let now = self.clock.now();

        let mut stats = self.stats.clone();
        stats.set_snapshot(self.entries.len(), self.memory_usage());

        let mut hot: Vec<(&String, &CacheEntry)> = self.entries.iter().collect();
        hot.sort_by(|(ka, a), (kb, b)| b.access_count.cmp(&a.access_count).then(ka.cmp(kb)));
        let top_entries = hot
            .into_iter()
            .take(self.top_n)
            .map(|(key, entry)| HotEntry {
                key: key.clone(),
                category: CacheKey::parse(key).category().to_string(),
                access_count: entry.access_count,
                size_bytes: entry.size_bytes,
                age_secs: entry.age(now).as_secs(),
                idle_secs: entry.idle(now).as_secs(),
            })
            .collect();

        CacheReport {
            stats,
            top_entries,
            default_category: self.categories.default_config().clone(),
            categories: self.categories.categories().clone(),
        }
    }

    // == Reset Stats ==
    /// Zeroes hits, misses and evictions. Entries are kept.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        info!("cache statistics reset");
    }

    // == Accessors ==
    /// Returns true if `key` has an entry, expired or not. No counters move.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn schema(&self) -> &KeySchema {
        &self.schema
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn memory_usage(&self) -> usize {
        self.entries.values().map(|e| e.size_bytes).sum()
    }

    fn refresh_snapshot(&mut self) {
        let bytes = self.memory_usage();
        self.stats.set_snapshot(self.entries.len(), bytes);
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new(CategoryTable::default(), KeySchema::default())
    }
}
