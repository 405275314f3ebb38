//! Central module for the application's non-auth API endpoints.
//!
//! Authentication routes live in `crate::auth`; this module holds the
//! system probes, the news feed, and the shared response helpers.

pub mod common;
pub mod news;
pub mod system;

use crate::api::common::ApiResponse;
use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Every route the server answers, as advertised by the 404 fallback.
pub const AVAILABLE_ENDPOINTS: [&str; 6] = [
    "GET /api/health",
    "POST /api/auth/register",
    "POST /api/auth/login",
    "PUT /api/auth/profile",
    "GET /api/test-db",
    "GET /api/news",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointIndex {
    pub available_endpoints: Vec<&'static str>,
}

/// Fallback for unmatched routes
pub async fn endpoint_not_found() -> (StatusCode, Json<ApiResponse<EndpointIndex>>) {
    let response = ApiResponse::failure(
        EndpointIndex {
            available_endpoints: AVAILABLE_ENDPOINTS.to_vec(),
        },
        "Endpoint not found",
    );
    (StatusCode::NOT_FOUND, Json(response))
}
