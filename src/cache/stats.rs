//! Cache Statistics Module
//!
//! Tracks hits, misses and evictions, plus snapshot values derived from the
//! live entry table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CategoryConfig;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Entries removed for capacity or expiry
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Sum of `size_bytes` over the entry table
    pub memory_usage_bytes: usize,
    /// hits / (hits + misses), 0 when nothing was read
    pub hit_rate: f64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
        self.refresh_hit_rate();
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.refresh_hit_rate();
    }

    // == Record Evictions ==
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    // == Update Snapshot ==
    /// Overwrites the table-derived values.
    pub fn set_snapshot(&mut self, total_entries: usize, memory_usage_bytes: usize) {
        self.total_entries = total_entries;
        self.memory_usage_bytes = memory_usage_bytes;
    }

    // == Reset ==
    /// Zeroes the counters; snapshot values are left alone.
    pub fn reset(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
        self.refresh_hit_rate();
    }

    fn refresh_hit_rate(&mut self) {
        let total = self.hits + self.misses;
        self.hit_rate = if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        };
    }
}

// == Hot Entry ==
/// One row of the most-accessed list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotEntry {
    pub key: String,
    pub category: String,
    pub access_count: u64,
    pub size_bytes: usize,
    pub age_secs: u64,
    pub idle_secs: u64,
}

// == Cache Report ==
/// Everything `stats()` returns.
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Entries ordered by `access_count`, highest first
    pub top_entries: Vec<HotEntry>,
    pub default_category: CategoryConfig,
    pub categories: BTreeMap<String, CategoryConfig>,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate, 1.0);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate, 0.75);
    }

    #[test]
    fn test_record_evictions() {
        let mut stats = CacheStats::new();
        stats.record_evictions(2);
        stats.record_evictions(0);
        stats.record_evictions(3);
        assert_eq!(stats.evictions, 5);
    }

    #[test]
    fn test_reset_keeps_snapshot() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_evictions(4);
        stats.set_snapshot(12, 340);

        stats.reset();

        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.hit_rate, 0.0);
        assert_eq!(stats.total_entries, 12);
        assert_eq!(stats.memory_usage_bytes, 340);
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = CacheReport {
            stats: CacheStats::new(),
            top_entries: Vec::new(),
            default_category: CategoryConfig::new(
                std::time::Duration::from_secs(60),
                10,
                crate::cache::EvictionStrategy::Lru,
            ),
            categories: BTreeMap::new(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["hits"], 0);
        assert_eq!(json["default_category"]["strategy"], "lru");
    }
}
