//! Voyage API - REST layer for the travel planner
//!
//! Axum routes for itinerary generation, destination suggestions and
//! traveler accounts, backed by PostgreSQL (or an in-memory store for
//! development) and instrumented with tracing and Prometheus metrics.

pub mod macros;
pub mod config;
pub mod credentials;
pub mod db;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{ApiConfig, ProviderSecrets, StorageBackend};
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
