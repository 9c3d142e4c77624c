//! Cache Module
//!
//! Category-aware in-memory caching with lazy TTL expiry and LRU/LFU/FIFO
//! eviction.

mod category;
mod clock;
mod entry;
mod eviction;
mod key;
mod manager;
mod preload;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use category::{CategoryConfig, CategoryTable, EvictionStrategy};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{estimate_size, CacheEntry};
pub use key::{category_of, compose, CacheKey, KEY_DELIMITER};
pub use manager::{CacheManager, SharedCacheManager, DEFAULT_TOP_N};
pub use preload::{KeySchema, Record};
pub use stats::{CacheReport, CacheStats, HotEntry};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
