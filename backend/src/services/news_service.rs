//! Weather and climate news feed.
//!
//! When an upstream news API key is configured the feed is fetched live,
//! filtered down to weather-related stories, de-duplicated and sorted newest
//! first. Any upstream problem degrades to a static list of advisories; the
//! feed itself never fails.

use crate::config::Config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

/// Most articles served from a live fetch.
const MAX_ARTICLES: usize = 15;

const UPSTREAM_QUERY: &str =
    "(weather OR climate OR monsoon OR rainfall OR disaster OR cyclone OR flood OR drought OR IMD) AND India";

/// An article counts as relevant when its title or description mentions one of these.
const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "climate",
    "monsoon",
    "rainfall",
    "temperature",
    "humidity",
    "solar",
    "disaster",
    "cyclone",
    "flood",
    "drought",
    "heatwave",
    "imd",
    "indian meteorological",
    "ndma",
    "thunderstorm",
    "lightning",
    "earthquake",
    "tsunami",
    "landslide",
    "fog",
    "smog",
    "air quality",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSource {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub url: String,
    pub source: NewsSource,
}

/// Payload of `GET /api/news`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFeed {
    pub status: String,
    pub articles: Vec<NewsArticle>,
    pub total_results: usize,
}

impl From<Vec<NewsArticle>> for NewsFeed {
    fn from(articles: Vec<NewsArticle>) -> Self {
        NewsFeed {
            status: "success".to_string(),
            total_results: articles.len(),
            articles,
        }
    }
}

/// Article as the upstream API reports it; every field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub url: Option<String>,
    pub source: Option<UpstreamSource>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamSource {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamResponse {
    #[serde(default)]
    articles: Vec<UpstreamArticle>,
}

fn article(title: &str, description: &str, published_at: &str, source: &str) -> NewsArticle {
    NewsArticle {
        title: title.to_string(),
        description: Some(description.to_string()),
        published_at: DateTime::parse_from_rfc3339(published_at)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default(),
        url: "#".to_string(),
        source: NewsSource {
            name: source.to_string(),
        },
    }
}

/// Static advisories served whenever live news is unavailable.
pub fn fallback_articles() -> Vec<NewsArticle> {
    vec![
        article(
            "IMD issues orange alert: Heavy rainfall expected across Tamil Nadu and Kerala",
            "Indian Meteorological Department warns of intense monsoon activity",
            "2025-09-01T10:30:00Z",
            "IMD Weather Updates",
        ),
        article(
            "Cyclone threat in Bay of Bengal: Coastal evacuation plans activated",
            "NDMA coordinates with state governments for emergency preparedness",
            "2025-09-01T08:15:00Z",
            "NDMA Emergency",
        ),
        article(
            "Record solar energy generation reported across western states",
            "Clear skies boost renewable energy production by 18% this month",
            "2025-08-31T16:45:00Z",
            "Ministry of New & Renewable Energy",
        ),
        article(
            "Drought relief: Monsoon rains revive agriculture in Maharashtra",
            "Farmers report improved soil moisture levels after delayed monsoon",
            "2025-08-31T14:20:00Z",
            "Agriculture Ministry",
        ),
        article(
            "Heat wave warning: Northern plains to experience extreme temperatures",
            "Health advisory issued as mercury expected to cross 47°C mark",
            "2025-08-30T11:30:00Z",
            "India Meteorological Department",
        ),
        article(
            "Flood management: Smart early warning systems deployed in Assam",
            "Technology integration helps reduce flood impact in vulnerable areas",
            "2025-08-30T09:15:00Z",
            "Disaster Management Authority",
        ),
    ]
}

fn is_weather_related(title: &str, description: &str) -> bool {
    let title = title.to_lowercase();
    let description = description.to_lowercase();
    WEATHER_KEYWORDS
        .iter()
        .any(|keyword| title.contains(keyword) || description.contains(keyword))
}

/// Keeps relevant, well-formed articles, drops repeated titles, newest first.
pub fn curate(articles: Vec<UpstreamArticle>) -> Vec<NewsArticle> {
    let mut seen = HashSet::new();
    let mut curated: Vec<NewsArticle> = articles
        .into_iter()
        .filter_map(|raw| {
            let title = raw.title.filter(|t| !t.trim().is_empty())?;
            let published_at = DateTime::parse_from_rfc3339(raw.published_at.as_deref()?)
                .ok()?
                .with_timezone(&Utc);
            if !is_weather_related(&title, raw.description.as_deref().unwrap_or_default()) {
                return None;
            }
            Some(NewsArticle {
                title,
                description: raw.description,
                published_at,
                url: raw.url.unwrap_or_else(|| "#".to_string()),
                source: NewsSource {
                    name: raw
                        .source
                        .and_then(|s| s.name)
                        .unwrap_or_else(|| "News Source".to_string()),
                },
            })
        })
        .filter(|article| seen.insert(article.title.clone()))
        .collect();

    curated.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    curated.truncate(MAX_ARTICLES);
    curated
}

pub struct NewsService {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl NewsService {
    /// Builds the service from configuration; live fetching is enabled only
    /// when an API key is present.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.news_timeout_seconds))
            .build()?;

        Ok(NewsService {
            http,
            api_key: config.news_api_key.clone(),
            endpoint: config.news_api_url.clone(),
        })
    }

    /// Current feed; never fails.
    pub async fn latest(&self) -> Vec<NewsArticle> {
        let Some(api_key) = self.api_key.as_deref() else {
            return fallback_articles();
        };

        match self.fetch_upstream(api_key).await {
            Ok(articles) if !articles.is_empty() => {
                info!("Fetched {} weather news articles", articles.len());
                articles
            }
            Ok(_) => {
                info!("No relevant upstream news, serving fallback articles");
                fallback_articles()
            }
            Err(e) => {
                warn!("News upstream failed, serving fallback articles: {}", e);
                fallback_articles()
            }
        }
    }

    async fn fetch_upstream(&self, api_key: &str) -> Result<Vec<NewsArticle>, reqwest::Error> {
        let response: UpstreamResponse = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", UPSTREAM_QUERY),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", "20"),
                ("apiKey", api_key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(curate(response.articles))
    }
}
