//! Handler functions for authentication-related API endpoints.
//!
//! These functions unwrap the request body, delegate to
//! `auth::service::AuthService`, and wrap the outcome in the standard
//! response envelope.

use crate::AppState;
use crate::api::common::{
    ApiResponse, ApiResult, json_rejection_to_http, ok, service_error_to_http,
};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
};

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(state): Extension<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<UserEnvelope> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;

    match AuthService::from_state(&state).register(payload).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(
                UserEnvelope { user },
                "User registered successfully",
            )),
        )),
        Err(error) => Err(service_error_to_http(error, state.config.is_development())),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;

    match AuthService::from_state(&state).login(payload).await {
        Ok(response) => ok(response, "Login successful"),
        Err(error) => Err(service_error_to_http(error, state.config.is_development())),
    }
}

/// Handle profile update for the authenticated caller
#[axum::debug_handler]
pub async fn update_profile(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> ApiResult<UserEnvelope> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;

    match AuthService::from_state(&state)
        .update_profile(&claims, payload)
        .await
    {
        Ok(user) => ok(UserEnvelope { user }, "Profile updated successfully"),
        Err(error) => Err(service_error_to_http(error, state.config.is_development())),
    }
}
