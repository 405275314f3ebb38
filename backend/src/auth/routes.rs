//! Defines the HTTP routes specifically for authentication.
//!
//! Mounted under `/api/auth` by the top-level router.

use crate::auth::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{post, put},
};

/// Creates the authentication router with all auth-related routes.
///
/// The token check is a route layer on `PUT /profile` only, so other methods
/// on that path fall through to the not-found handler unauthenticated.
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/profile",
            put(update_profile).route_layer(middleware::from_fn(jwt_auth)),
        )
}
