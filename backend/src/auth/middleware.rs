//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer token and exposes its claims to downstream handlers
//! through request extensions.

use crate::AppState;
use crate::api::common::service_error_to_http;
use crate::auth::service::AuthService;
use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    match AuthService::from_state(&state).authenticate(auth_header) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(error) => service_error_to_http(error, state.config.is_development()).into_response(),
    }
}
