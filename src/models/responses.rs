//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheReport;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /clear
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Pattern used, absent when everything was cleared
    pub pattern: Option<String>,
    /// Number of entries removed
    pub removed: usize,
}

/// Response body for POST /invalidate/:subject
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub subject: String,
    pub removed: usize,
}

/// Response body for POST /preload
#[derive(Debug, Clone, Serialize)]
pub struct PreloadResponse {
    /// Number of records received
    pub records: usize,
    /// Entries in the cache afterwards
    pub total_entries: usize,
}

/// Response body for the stats endpoints (GET /stats, POST /stats/reset)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Snapshot time in ISO 8601 format
    pub generated_at: String,
    #[serde(flatten)]
    pub report: CacheReport,
}

impl StatsResponse {
    pub fn new(report: CacheReport) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            report,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
