//! Request and response payloads for the authentication endpoints.
//!
//! Request fields are all optional at the serde level so that a missing field
//! surfaces as a validation error with a proper message instead of a
//! deserialization rejection.

use crate::database::models::{ProfileUpdate, UserProfile};
use crate::errors::{ServiceError, ServiceResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// `local@domain.tld` with no whitespace and exactly one `@` before the domain.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Fields that must be present on registration; only `department` may be left out.
pub const REQUIRED_REGISTER_FIELDS: [&str; 6] =
    ["name", "email", "password", "role", "region", "phone"];

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Empty strings are stored as NULL.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Registration request payload
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    pub name: Option<String>,

    #[validate(regex(path = *EMAIL_SHAPE, message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,

    pub role: Option<String>,
    pub department: Option<String>,
    pub region: Option<String>,
    pub phone: Option<String>,
}

impl RegisterRequest {
    /// Names of required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.name,
            &self.email,
            &self.password,
            &self.role,
            &self.region,
            &self.phone,
        ];
        REQUIRED_REGISTER_FIELDS
            .into_iter()
            .zip(values)
            .filter(|(_, value)| is_blank(value))
            .map(|(field, _)| field)
            .collect()
    }
}

/// Login request payload
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Both credentials, or a validation error when either is missing.
    pub fn credentials(&self) -> ServiceResult<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(ServiceError::validation("Email and password are required")),
        }
    }
}

/// Profile update payload
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub region: Option<String>,
    pub district: Option<String>,
}

impl UpdateProfileRequest {
    /// Turns the payload into a full column replacement.
    ///
    /// Absent or empty optional fields become `None`, which the store writes
    /// as NULL.
    pub fn into_update(self) -> ServiceResult<ProfileUpdate> {
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ServiceError::validation("Name is required"))?;

        Ok(ProfileUpdate {
            name,
            phone: non_empty(self.phone),
            department: non_empty(self.department),
            region: non_empty(self.region),
            district: non_empty(self.district),
        })
    }
}

/// Body of register and profile responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserProfile,
}

/// Login response containing the bearer token and user info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}
