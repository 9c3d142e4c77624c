//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `PUT /set` - Store a value under a category-prefixed key
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /clear?pattern=` - Remove all entries, or those containing a substring
//! - `POST /invalidate/:subject` - Drop every view that may hold a subject
//! - `POST /preload` - Warm the cache from a list of records
//! - `GET /stats` - Counters, memory estimate, hot entries, category table
//! - `POST /stats/reset` - Zero the counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
