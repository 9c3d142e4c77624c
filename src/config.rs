//! Configuration Module
//!
//! Loads process configuration from environment variables and the category
//! table from an optional JSON file.

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::cache::{CacheManager, CategoryTable, KeySchema, DEFAULT_TOP_N};
use crate::error::{CacheError, Result};
use crate::models::SeedRecord;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// JSON category table; built-in table when unset
    pub categories_file: Option<PathBuf>,
    /// JSON array of records preloaded at startup
    pub seed_file: Option<PathBuf>,
    /// Length of the hot-entry list in stats
    pub top_n: usize,
    /// Category whose subjects are preloaded and invalidated
    pub subject_category: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_CATEGORIES_FILE` - Category table JSON (default: built-in)
    /// - `CACHE_SEED_FILE` - Records to preload (default: none)
    /// - `CACHE_TOP_N` - Hot entries reported by stats (default: 10)
    /// - `CACHE_SUBJECT_CATEGORY` - Preload/invalidate category (default: conversion)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            categories_file: env::var("CACHE_CATEGORIES_FILE").ok().map(PathBuf::from),
            seed_file: env::var("CACHE_SEED_FILE").ok().map(PathBuf::from),
            top_n: env::var("CACHE_TOP_N")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.top_n),
            subject_category: env::var("CACHE_SUBJECT_CATEGORY")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.subject_category),
        }
    }

    /// Reads and validates the category table.
    pub fn category_table(&self) -> Result<CategoryTable> {
        match &self.categories_file {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|e| {
                    CacheError::InvalidConfig(format!("reading {}: {}", path.display(), e))
                })?;
                CategoryTable::from_json(&json)
            }
            None => Ok(CategoryTable::default()),
        }
    }

    pub fn key_schema(&self) -> KeySchema {
        KeySchema::for_category(&self.subject_category)
    }

    /// Builds the cache manager described by this configuration.
    pub fn build_cache(&self) -> Result<CacheManager> {
        let table = self.category_table()?;
        Ok(CacheManager::new(table, self.key_schema()).with_top_n(self.top_n))
    }

    /// Reads the seed file, if one is configured.
    pub fn seed_records(&self) -> Result<Option<Vec<SeedRecord>>> {
        let Some(path) = &self.seed_file else {
            return Ok(None);
        };
        let json = fs::read_to_string(path).map_err(|e| {
            CacheError::InvalidConfig(format!("reading {}: {}", path.display(), e))
        })?;
        let records = serde_json::from_str(&json).map_err(|e| {
            CacheError::InvalidConfig(format!("parsing {}: {}", path.display(), e))
        })?;
        Ok(Some(records))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            categories_file: None,
            seed_file: None,
            top_n: DEFAULT_TOP_N,
            subject_category: "conversion".to_string(),
        }
    }
}
