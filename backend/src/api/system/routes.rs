//! Routes for the unauthenticated system probes.

use super::handlers::{health, test_db};
use axum::{Router, routing::get};

pub fn system_router() -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/test-db", get(test_db))
}
