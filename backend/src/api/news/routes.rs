use super::handlers::latest_news;
use axum::{Router, routing::get};

pub fn news_router() -> Router {
    Router::new().route("/api/news", get(latest_news))
}
