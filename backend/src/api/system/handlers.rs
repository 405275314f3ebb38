//! Handler functions for the health and database probes.

use crate::AppState;
use crate::api::common::{ApiResult, ok, service_error_to_http};
use crate::errors::ServiceError;
use axum::extract::Extension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// `connected` or `disconnected`
    pub database: String,
}

impl HealthStatus {
    pub fn is_database_connected(&self) -> bool {
        self.database == "connected"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseReport {
    pub status: String,
    pub user_count: i64,
}

/// Reports process liveness and whether the store answers.
#[axum::debug_handler]
pub async fn health(Extension(state): Extension<AppState>) -> ApiResult<HealthStatus> {
    let database = if state.store.ping().await {
        "connected"
    } else {
        "disconnected"
    };

    ok(
        HealthStatus {
            status: "OK".to_string(),
            database: database.to_string(),
        },
        "Climate Guard API is running",
    )
}

/// Counts users to prove the store is readable.
#[axum::debug_handler]
pub async fn test_db(Extension(state): Extension<AppState>) -> ApiResult<DatabaseReport> {
    match state.store.count().await {
        Ok(user_count) => ok(
            DatabaseReport {
                status: "Database connection working".to_string(),
                user_count,
            },
            "Database test successful",
        ),
        Err(error) => {
            tracing::error!("Database test failed: {}", error);
            Err(service_error_to_http(
                ServiceError::from(error),
                state.config.is_development(),
            ))
        }
    }
}
