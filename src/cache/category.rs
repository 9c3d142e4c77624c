//! Category Configuration Module
//!
//! Per-category TTL, capacity and eviction strategy, fixed at startup.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::KEY_DELIMITER;
use crate::error::{CacheError, Result};

// == Eviction Strategy ==
/// Ordering used to pick victims when a category is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionStrategy {
    /// Least recently accessed first
    #[default]
    #[serde(alias = "LRU")]
    Lru,
    /// Lowest access count first
    #[serde(alias = "LFU")]
    Lfu,
    /// Oldest insertion first
    #[serde(alias = "FIFO")]
    Fifo,
}

impl EvictionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lru => "lru",
            Self::Lfu => "lfu",
            Self::Fifo => "fifo",
        }
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Category Config ==
/// Policy for one category of keys.
///
/// In JSON the TTL is given as either `ttl_secs` or `ttl_ms`; it is written
/// back as `ttl_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CategoryConfigRepr", into = "CategoryConfigRepr")]
pub struct CategoryConfig {
    /// Maximum entry age
    pub ttl: Duration,
    /// Maximum number of live entries in the category
    pub max_size: usize,
    /// Victim ordering when `max_size` is reached
    pub strategy: EvictionStrategy,
}

/// Wire shape of a [`CategoryConfig`].
#[derive(Serialize, Deserialize)]
struct CategoryConfigRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ttl_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ttl_ms: Option<u64>,
    max_size: usize,
    #[serde(default)]
    strategy: EvictionStrategy,
}

impl TryFrom<CategoryConfigRepr> for CategoryConfig {
    type Error = String;

    fn try_from(repr: CategoryConfigRepr) -> std::result::Result<Self, Self::Error> {
        let ttl = match (repr.ttl_secs, repr.ttl_ms) {
            (Some(secs), None) => Duration::from_secs(secs),
            (None, Some(ms)) => Duration::from_millis(ms),
            (Some(_), Some(_)) => return Err("set only one of ttl_secs and ttl_ms".to_string()),
            (None, None) => return Err("missing ttl_secs or ttl_ms".to_string()),
        };
        Ok(Self::new(ttl, repr.max_size, repr.strategy))
    }
}

impl From<CategoryConfig> for CategoryConfigRepr {
    fn from(config: CategoryConfig) -> Self {
        Self {
            ttl_secs: None,
            ttl_ms: Some(u64::try_from(config.ttl.as_millis()).unwrap_or(u64::MAX)),
            max_size: config.max_size,
            strategy: config.strategy,
        }
    }
}

impl CategoryConfig {
    // == Constructor ==
    pub fn new(ttl: Duration, max_size: usize, strategy: EvictionStrategy) -> Self {
        Self {
            ttl,
            max_size,
            strategy,
        }
    }

    // == Eviction Batch ==
    /// Number of entries dropped per eviction pass: `ceil(max_size / 10)`,
    /// at least one.
    pub fn eviction_batch(&self) -> usize {
        self.max_size.div_ceil(10).max(1)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidConfig(format!(
                "category '{}': ttl must be positive",
                name
            )));
        }
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(format!(
                "category '{}': max_size must be positive",
                name
            )));
        }
        Ok(())
    }
}

// == Category Table ==
/// Validated, immutable mapping from category name to policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    default: CategoryConfig,
    categories: BTreeMap<String, CategoryConfig>,
}

/// On-disk shape of a category table.
#[derive(Debug, Deserialize)]
struct CategoryTableFile {
    #[serde(default)]
    default: Option<CategoryConfig>,
    #[serde(default)]
    categories: BTreeMap<String, CategoryConfig>,
}

impl CategoryTable {
    // == Constructor ==
    /// Builds a table, rejecting non-positive TTLs or sizes and malformed
    /// category names.
    pub fn new<I, S>(default: CategoryConfig, categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, CategoryConfig)>,
        S: Into<String>,
    {
        default.validate("default")?;

        let mut table = BTreeMap::new();
        for (name, config) in categories {
            let name = name.into();
            if name.is_empty() {
                return Err(CacheError::InvalidConfig(
                    "category name cannot be empty".to_string(),
                ));
            }
            if name.contains(KEY_DELIMITER) {
                return Err(CacheError::InvalidConfig(format!(
                    "category '{}' contains the key delimiter '{}'",
                    name, KEY_DELIMITER
                )));
            }
            config.validate(&name)?;
            table.insert(name, config);
        }

        Ok(Self {
            default,
            categories: table,
        })
    }

    // == From JSON ==
    /// Parses `{"default": {...}, "categories": {"name": {...}}}`.
    ///
    /// A missing `default` falls back to the built-in default policy.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CategoryTableFile = serde_json::from_str(json)
            .map_err(|e| CacheError::InvalidConfig(format!("category table: {}", e)))?;
        let default = file.default.unwrap_or_else(default_policy);
        Self::new(default, file.categories)
    }

    // == Resolve ==
    /// Policy for a category, falling back to the default for unknown names.
    pub fn resolve(&self, category: &str) -> &CategoryConfig {
        self.categories.get(category).unwrap_or(&self.default)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn default_config(&self) -> &CategoryConfig {
        &self.default
    }

    pub fn categories(&self) -> &BTreeMap<String, CategoryConfig> {
        &self.categories
    }
}

fn default_policy() -> CategoryConfig {
    CategoryConfig::new(Duration::from_secs(600), 100, EvictionStrategy::Lru)
}

impl Default for CategoryTable {
    /// Built-in policies for conversion rates, product views and statistics.
    fn default() -> Self {
        let categories = [
            (
                "conversion",
                CategoryConfig::new(Duration::from_secs(30 * 60), 500, EvictionStrategy::Lru),
            ),
            (
                "product",
                CategoryConfig::new(Duration::from_secs(15 * 60), 200, EvictionStrategy::Lfu),
            ),
            (
                "stats",
                CategoryConfig::new(Duration::from_secs(5 * 60), 50, EvictionStrategy::Fifo),
            ),
        ];

        Self {
            default: default_policy(),
            categories: categories
                .into_iter()
                .map(|(name, config)| (name.to_string(), config))
                .collect(),
        }
    }
}
