//! Refcache - category-aware in-process cache for reference data
//!
//! Absorbs repeated reads of slow-changing records with per-category TTL,
//! capacity and LRU/LFU/FIFO eviction, pattern invalidation and statistics.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheManager, CategoryConfig, CategoryTable, EvictionStrategy, KeySchema};
pub use config::Config;
pub use error::CacheError;
