//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their access metadata.

use std::time::{Duration, Instant};

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Creation time; reset only by replacing the entry
    pub inserted_at: Instant,
    /// Time of the last successful read (or of insertion)
    pub last_accessed_at: Instant,
    /// Starts at 1 on insert, +1 per successful read
    pub access_count: u64,
    /// Estimated serialized size, computed once at insert
    pub size_bytes: usize,
    /// Logical insertion order, breaks timestamp ties
    pub(crate) inserted_seq: u64,
    /// Logical order of the last access
    pub(crate) accessed_seq: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a fresh entry stamped at `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `now` - Insertion time
    /// * `seq` - Logical tick from the owning manager
    pub fn new(value: Value, now: Instant, seq: u64) -> Self {
        let size_bytes = estimate_size(&value);
        Self {
            value,
            inserted_at: now,
            last_accessed_at: now,
            access_count: 1,
            size_bytes,
            inserted_seq: seq,
            accessed_seq: seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is expired.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }

    // == Touch ==
    /// Records a successful read.
    pub fn touch(&mut self, now: Instant, seq: u64) {
        self.access_count += 1;
        self.last_accessed_at = now;
        self.accessed_seq = seq;
    }

    /// Time since insertion.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    /// Time since the last access.
    pub fn idle(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_accessed_at)
    }
}

// == Utility Functions ==
/// Approximate footprint of a value: length of its compact JSON encoding.
///
/// `serde_json` maps are ordered, so equal values always yield equal sizes.
pub fn estimate_size(value: &Value) -> usize {
    value.to_string().len()
}
