//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, token signing secret, listening port and the optional
//! upstream news provider.

use crate::utils::password::{MAX_COST, MIN_COST};
use anyhow::{Context, Result, bail};
use std::env;
use std::str::FromStr;

/// Default upstream for the weather news feed.
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Runtime environment the process was started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => bail!("APP_ENV must be 'development' or 'production', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    pub environment: Environment,
    pub news_api_key: Option<String>,
    pub news_api_url: String,
    pub news_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://climate_guard.db?mode=rwc".to_string());

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = lookup("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .context("JWT_SECRET not set")?;

        let bcrypt_cost = lookup("BCRYPT_COST")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;
        if !(MIN_COST..=MAX_COST).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between {} and {}", MIN_COST, MAX_COST);
        }

        let server_port = lookup("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid number")?;

        let environment = match lookup("APP_ENV") {
            Some(value) => value.parse::<Environment>()?,
            None => Environment::Production,
        };

        let news_api_key = lookup("NEWS_API_KEY").filter(|key| !key.trim().is_empty());
        let news_api_url =
            lookup("NEWS_API_URL").unwrap_or_else(|| DEFAULT_NEWS_API_URL.to_string());

        let news_timeout_seconds = lookup("NEWS_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u64>()
            .context("NEWS_TIMEOUT_SECONDS must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            bcrypt_cost,
            server_port,
            environment,
            news_api_key,
            news_api_url,
            news_timeout_seconds,
        })
    }

    /// Whether internal error detail may be echoed back to clients.
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
