//! Global application error types.
//!
//! This module defines the error types shared across the backend: the
//! credential store's failures and the service-level taxonomy that every
//! endpoint translates into an HTTP response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised by a credential store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email is already taken; raised by the uniqueness constraint itself.
    #[error("email already registered")]
    DuplicateEmail,
    #[error("no user with id {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Field-specific validation error details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,
    /// Description of the validation failure
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Generic service error used by every endpoint.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("{entity} with this {field} already exists")]
    AlreadyExists { entity: String, field: String },

    /// Wrong password and unknown email collapse into this one variant.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn validation_with_fields(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
        }
    }

    /// Collapses `validator` output into a single validation error.
    ///
    /// Fields are sorted so the message is stable across runs.
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    FieldError::new(
                        field.to_string(),
                        error
                            .message
                            .as_ref()
                            .map(|message| message.to_string())
                            .unwrap_or_else(|| "Invalid value".to_string()),
                    )
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        let message = fields
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self::Validation { message, fields }
    }

    pub fn already_exists(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            field: field.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateEmail => ServiceError::already_exists("User", "email"),
            StoreError::NotFound(id) => ServiceError::not_found("User", id),
            StoreError::Database(source) => ServiceError::Database {
                source: source.into(),
            },
        }
    }
}
