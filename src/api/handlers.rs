//! API Handlers
//!
//! HTTP request handlers for each admin endpoint.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{CacheManager, SharedCacheManager};
use crate::error::{CacheError, Result};
use crate::models::{
    ClearParams, ClearResponse, GetResponse, HealthResponse, InvalidateResponse, PreloadResponse,
    SeedRecord, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Contains the cache manager behind a single `Arc<RwLock<_>>`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache manager
    pub cache: SharedCacheManager,
}

impl AppState {
    /// Creates a new AppState owning the given manager.
    pub fn new(cache: CacheManager) -> Self {
        Self {
            cache: cache.into_shared(),
        }
    }

    /// Creates a new AppState around an already shared manager.
    pub fn from_shared(cache: SharedCacheManager) -> Self {
        Self { cache }
    }
}

/// Handler for PUT /set
///
/// Write-through after a successful upstream fetch or mutation.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a read touches access metadata and counters
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /clear?pattern=...
pub async fn clear_handler(
    State(state): State<AppState>,
    Query(params): Query<ClearParams>,
) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.clear(params.pattern.as_deref());

    Json(ClearResponse {
        pattern: params.pattern,
        removed,
    })
}

/// Handler for POST /invalidate/:subject
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(subject): Path<String>,
) -> Json<InvalidateResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.invalidate(&subject);

    Json(InvalidateResponse { subject, removed })
}

/// Handler for POST /preload
pub async fn preload_handler(
    State(state): State<AppState>,
    Json(records): Json<Vec<SeedRecord>>,
) -> Json<PreloadResponse> {
    let mut cache = state.cache.write().await;
    cache.preload(&records);

    Json(PreloadResponse {
        records: records.len(),
        total_entries: cache.len(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(cache.stats()))
}

/// Handler for POST /stats/reset
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let mut cache = state.cache.write().await;
    cache.reset_stats();
    Json(StatsResponse::new(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
