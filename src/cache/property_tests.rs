//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check invariants of the cache manager over arbitrary
//! operation sequences.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{
    CacheManager, CategoryConfig, CategoryTable, EvictionStrategy, KeySchema,
    ManualClock,
};

// == Test Configuration ==
const TEST_CATEGORIES: [&str; 3] = ["conversion", "product", "stats"];
const TEST_MAX_SIZE: usize = 12;
const TEST_TTL_SECS: u64 = 300;

fn test_table(strategy: EvictionStrategy, max_size: usize) -> CategoryTable {
    let config = CategoryConfig::new(Duration::from_secs(TEST_TTL_SECS), max_size, strategy);
    CategoryTable::new(
        config.clone(),
        TEST_CATEGORIES.iter().map(|name| (*name, config.clone())),
    )
    .unwrap()
}

fn test_manager(strategy: EvictionStrategy, max_size: usize) -> (CacheManager, ManualClock) {
    let clock = ManualClock::new();
    let cache = CacheManager::with_clock(
        test_table(strategy, max_size),
        KeySchema::default(),
        Arc::new(clock.clone()),
    )
    .with_top_n(usize::MAX);
    (cache, clock)
}

// == Strategies ==
/// Generates category-prefixed keys over a small subject space so that
/// sequences revisit keys.
fn key_strategy() -> impl Strategy<Value = String> {
    (prop::sample::select(TEST_CATEGORIES.to_vec()), "[a-f0-9]{1,3}")
        .prop_map(|(category, subject)| format!("{}:{}", category, subject))
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,64}".prop_map(Value::from),
        (any::<bool>(), "[a-z]{1,8}").prop_map(|(flag, name)| json!({"name": name, "active": flag})),
    ]
}

fn strategy_strategy() -> impl Strategy<Value = EvictionStrategy> {
    prop::sample::select(vec![
        EvictionStrategy::Lru,
        EvictionStrategy::Lfu,
        EvictionStrategy::Fifo,
    ])
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Value },
    Get { key: String },
    Clear { pattern: String },
    Advance { secs: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => "[a-f0-9]{1,2}".prop_map(|pattern| CacheOp::Clear { pattern }),
        1 => (0u64..120).prop_map(|secs| CacheOp::Advance { secs }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hits and misses match what `get` returned, and the hit rate is
    // always hits / (hits + misses).
    #[test]
    fn prop_statistics_accuracy(
        strategy in strategy_strategy(),
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let (mut cache, clock) = test_manager(strategy, TEST_MAX_SIZE);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, value),
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Clear { pattern } => {
                    cache.clear(Some(pattern.as_str()));
                }
                CacheOp::Advance { secs } => clock.advance(Duration::from_secs(secs)),
            }

            let stats = cache.stats().stats;
            let total = stats.hits + stats.misses;
            let expected_rate = if total == 0 { 0.0 } else { stats.hits as f64 / total as f64 };
            prop_assert_eq!(stats.hit_rate, expected_rate);
        }

        let stats = cache.stats().stats;
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, cache.len(), "Total entries mismatch");
    }

    // A value just written is read back unchanged.
    #[test]
    fn prop_hit_after_set(
        strategy in strategy_strategy(),
        prefill in prop::collection::vec((key_strategy(), value_strategy()), 0..40),
        key in key_strategy(),
        value in value_strategy()
    ) {
        let (mut cache, _) = test_manager(strategy, TEST_MAX_SIZE);
        for (k, v) in prefill {
            cache.set(k, v);
        }

        cache.set(key.clone(), value.clone());
        prop_assert_eq!(cache.get(&key), Some(value));
    }

    // No category ever holds more than its max_size entries.
    #[test]
    fn prop_capacity_enforcement(
        strategy in strategy_strategy(),
        max_size in 1usize..15,
        ops in prop::collection::vec(cache_op_strategy(), 1..150)
    ) {
        let (mut cache, clock) = test_manager(strategy, max_size);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, value),
                CacheOp::Get { key } => {
                    cache.get(&key);
                }
                CacheOp::Clear { pattern } => {
                    cache.clear(Some(pattern.as_str()));
                }
                CacheOp::Advance { secs } => clock.advance(Duration::from_secs(secs)),
            }

            let report = cache.stats();
            for category in TEST_CATEGORIES {
                let count = report
                    .top_entries
                    .iter()
                    .filter(|e| e.category == category)
                    .count();
                prop_assert!(count <= max_size, "{} holds {} > {}", category, count, max_size);
            }
        }
    }

    // Pattern clear removes exactly the keys containing the pattern.
    #[test]
    fn prop_pattern_clear_exact(
        keys in prop::collection::vec(key_strategy(), 0..30),
        pattern in "[a-f0-9]{1,2}"
    ) {
        let (mut cache, _) = test_manager(EvictionStrategy::Lru, 100);
        let unique: HashSet<String> = keys.into_iter().collect();
        for key in &unique {
            cache.set(key.clone(), json!(key));
        }

        let expected = unique.iter().filter(|k| k.contains(pattern.as_str())).count();
        let removed = cache.clear(Some(pattern.as_str()));

        prop_assert_eq!(removed, expected);
        prop_assert_eq!(cache.len(), unique.len() - expected);
        for key in &unique {
            prop_assert_eq!(cache.contains(key), !key.contains(pattern.as_str()));
        }
    }

    // Filling a category to N under LRU with pure inserts, then adding one
    // more key, drops exactly the first key inserted.
    #[test]
    fn prop_lru_evicts_oldest_insert(
        subjects in prop::collection::hash_set("[a-z]{1,6}", 2..10),
        new_subject in "[0-9]{1,4}"
    ) {
        let keys: Vec<String> = subjects.iter().map(|s| format!("conversion:{}", s)).collect();
        let capacity = keys.len();
        let (mut cache, clock) = test_manager(EvictionStrategy::Lru, capacity);

        for key in &keys {
            cache.set(key.clone(), json!(key));
            clock.advance(Duration::from_millis(10));
        }
        cache.set(format!("conversion:{}", new_subject), json!("new"));

        let live = cache.stats().top_entries.iter().filter(|e| e.category == "conversion").count();
        prop_assert!(live <= capacity);
        prop_assert!(!cache.contains(&keys[0]), "Oldest key '{}' should have been evicted", keys[0]);
        for key in keys.iter().skip(1) {
            prop_assert!(cache.contains(key), "Key '{}' should still exist", key);
        }
    }

    // resetStats twice equals once; entries survive.
    #[test]
    fn prop_reset_stats_idempotent(
        ops in prop::collection::vec(cache_op_strategy(), 0..50)
    ) {
        let (mut cache, clock) = test_manager(EvictionStrategy::Lfu, TEST_MAX_SIZE);
        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, value),
                CacheOp::Get { key } => {
                    cache.get(&key);
                }
                CacheOp::Clear { pattern } => {
                    cache.clear(Some(pattern.as_str()));
                }
                CacheOp::Advance { secs } => clock.advance(Duration::from_secs(secs)),
            }
        }

        let entries_before = cache.len();
        cache.reset_stats();
        let once = cache.stats().stats;
        cache.reset_stats();
        let twice = cache.stats().stats;

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(twice.hits + twice.misses + twice.evictions, 0);
        prop_assert_eq!(cache.len(), entries_before);
    }
}

// Separate block for TTL behaviour driven by the manual clock
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Advancing by at least the TTL turns the next read into a miss and an
    // eviction.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in value_strategy(),
        extra_secs in 0u64..1000
    ) {
        let (mut cache, clock) = test_manager(EvictionStrategy::Lru, TEST_MAX_SIZE);
        cache.set(key.clone(), value.clone());

        clock.advance(Duration::from_secs(TEST_TTL_SECS - 1));
        prop_assert_eq!(cache.get(&key), Some(value));

        clock.advance(Duration::from_secs(1 + extra_secs));
        let before = cache.stats().stats;
        prop_assert_eq!(cache.get(&key), None);
        let after = cache.stats().stats;

        prop_assert_eq!(after.misses, before.misses + 1);
        prop_assert_eq!(after.evictions, before.evictions + 1);
    }
}
