//! HTTP client for the Climate Guard API.
//!
//! Unwraps the response envelope so callers see either the payload or an
//! [`ClientError::Api`] carrying the server's status and message.

use crate::api::system::handlers::HealthStatus;
use crate::auth::models::{
    LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest, UserEnvelope,
};
use crate::database::models::UserProfile;
use crate::services::news_service::{NewsArticle, NewsFeed, fallback_articles};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the server origin, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        send(self.http.get(self.url("/api/health"))).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ClientError> {
        let envelope: UserEnvelope =
            send(self.http.post(self.url("/api/auth/register")).json(request)).await?;
        Ok(envelope.user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = LoginRequest::new(email, password);
        send(self.http.post(self.url("/api/auth/login")).json(&request)).await
    }

    pub async fn update_profile(
        &self,
        token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ClientError> {
        let envelope: UserEnvelope = send(
            self.http
                .put(self.url("/api/auth/profile"))
                .bearer_auth(token)
                .json(request),
        )
        .await?;
        Ok(envelope.user)
    }

    /// Latest weather news; the static advisories stand in when the server
    /// cannot be reached.
    pub async fn news(&self) -> Vec<NewsArticle> {
        match send::<NewsFeed>(self.http.get(self.url("/api/news"))).await {
            Ok(feed) => feed.articles,
            Err(e) => {
                warn!("Failed to fetch news, using fallback articles: {}", e);
                fallback_articles()
            }
        }
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body: Value = response.json().await?;

    let succeeded = body.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !status.is_success() || !succeeded {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope_message(&body, status),
        });
    }

    Ok(serde_json::from_value(body)?)
}

fn envelope_message(body: &Value, status: StatusCode) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}
