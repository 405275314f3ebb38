//! Climate Guard backend.
//!
//! Authentication API for the Climate Guard weather dashboard: registration,
//! login with 24-hour bearer tokens, profile updates, health probes and a
//! weather news feed. The `client` and `session` modules carry the
//! browser-side half: an HTTP client for the same surface and the persisted
//! session that decides which dashboard pages a user may open.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod session;
pub mod utils;

use crate::config::Config;
use crate::repositories::UserStore;
use crate::services::news_service::NewsService;
use crate::utils::jwt::TokenService;
use crate::utils::password::PasswordHasher;
use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub tokens: Arc<TokenService>,
    pub hasher: PasswordHasher,
    pub news: Arc<NewsService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the services around an already connected store.
    pub fn new(config: Config, store: Arc<dyn UserStore>) -> anyhow::Result<Self> {
        let news = NewsService::new(&config)?;

        Ok(AppState {
            store,
            tokens: Arc::new(TokenService::new(&config.jwt_secret)),
            hasher: PasswordHasher::new(config.bcrypt_cost),
            news: Arc::new(news),
            config: Arc::new(config),
        })
    }
}

/// Builds the Axum router with every route, the 404 fallback and shared state.
///
/// Unknown paths and known paths hit with the wrong method get the same 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::system::routes::system_router())
        .merge(api::news::routes::news_router())
        .nest("/api/auth", auth::routes::auth_router())
        .method_not_allowed_fallback(api::endpoint_not_found)
        .fallback(api::endpoint_not_found)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
