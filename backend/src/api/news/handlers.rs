//! Handler for the weather news feed.

use crate::AppState;
use crate::api::common::{ApiResult, ok};
use crate::services::news_service::NewsFeed;
use axum::extract::Extension;

/// Serves the latest weather news, falling back to static advisories.
#[axum::debug_handler]
pub async fn latest_news(Extension(state): Extension<AppState>) -> ApiResult<NewsFeed> {
    let articles = state.news.latest().await;
    ok(NewsFeed::from(articles), "News retrieved successfully")
}
