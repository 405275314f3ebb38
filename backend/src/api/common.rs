//! Response envelopes and error translation for the HTTP layer.
//!
//! Every endpoint answers with the same envelope:
//! - `success`: whether the call succeeded
//! - `message`: human-readable summary
//! - payload fields (`user`, `token`, ...) flattened at the top level
//! - `error`: machine-readable category, field details and, in development
//!   mode only, the internal error text
//! - `timestamp`: RFC 3339 time of the response
//!
//! # Error Handling Flow
//! 1. Service layer returns a `ServiceError`
//! 2. `service_error_to_http` converts it to a status code and JSON body
//! 3. Internal detail is attached only when the process runs in development mode

use crate::errors::{FieldError, ServiceError};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Serialize;

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Response payload, flattened into the top-level object
    #[serde(flatten)]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Response timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Internal error text, development mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a failed response that still carries a payload
    pub fn failure(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    pub fn error(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<FieldError>>,
        debug: Option<String>,
    ) -> Self {
        ApiResponse {
            success: false,
            message: message.into(),
            data: None,
            error: Some(ErrorDetails {
                error_type: error_type.into(),
                details,
                debug,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Wraps a payload into a `200 OK` envelope.
pub fn ok<T>(data: T, message: impl Into<String>) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data, message))))
}

/// Converts ServiceError to the matching HTTP status and envelope.
pub fn service_error_to_http(error: ServiceError, development: bool) -> ApiError {
    let (status, error_type, message, details, debug) = match error {
        ServiceError::Validation { message, fields } => (
            StatusCode::BAD_REQUEST,
            "validation_error",
            message,
            (!fields.is_empty()).then_some(fields),
            None,
        ),
        error @ ServiceError::AlreadyExists { .. } => (
            StatusCode::BAD_REQUEST,
            "already_exists",
            error.to_string(),
            None,
            None,
        ),
        error @ ServiceError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            error.to_string(),
            None,
            None,
        ),
        ServiceError::Unauthorized { message } => {
            (StatusCode::UNAUTHORIZED, "unauthorized", message, None, None)
        }
        ServiceError::NotFound { entity, identifier } => {
            tracing::debug!("{} '{}' not found", entity, identifier);
            (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{} not found", entity),
                None,
                None,
            )
        }
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error".to_string(),
                None,
                Some(format!("{:#}", source)),
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
                None,
                Some(message),
            )
        }
    };

    let debug = if development { debug } else { None };
    (
        status,
        Json(ApiResponse::error(message, error_type, details, debug)),
    )
}

/// Reports an unreadable JSON body through the standard envelope.
pub fn json_rejection_to_http(rejection: JsonRejection) -> ApiError {
    service_error_to_http(
        ServiceError::validation(format!("Invalid request body: {}", rejection.body_text())),
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Payload {
        user: &'static str,
    }

    #[test]
    fn test_success_flattens_payload() {
        let body =
            serde_json::to_value(ApiResponse::success(Payload { user: "a" }, "done")).unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "done");
        assert_eq!(body["user"], "a");
        assert!(body.get("data").is_none());
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_failure_keeps_payload() {
        let body =
            serde_json::to_value(ApiResponse::failure(Payload { user: "a" }, "nope")).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "nope");
        assert_eq!(body["user"], "a");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServiceError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                ServiceError::already_exists("User", "email"),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                ServiceError::unauthorized("no token"),
                StatusCode::UNAUTHORIZED,
            ),
            (ServiceError::not_found("User", "u1"), StatusCode::NOT_FOUND),
            (
                ServiceError::internal_error("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let (status, _) = service_error_to_http(error, false);
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_internal_detail_only_in_development() {
        let (_, Json(prod)) =
            service_error_to_http(ServiceError::internal_error("bcrypt exploded"), false);
        let prod = serde_json::to_value(prod).unwrap();
        assert_eq!(prod["message"], "Internal server error");
        assert!(prod["error"].get("debug").is_none());

        let (_, Json(dev)) =
            service_error_to_http(ServiceError::internal_error("bcrypt exploded"), true);
        let dev = serde_json::to_value(dev).unwrap();
        assert_eq!(dev["error"]["debug"], "bcrypt exploded");
    }

    #[test]
    fn test_validation_details_listed() {
        let error = ServiceError::validation_with_fields(
            "Missing required fields",
            vec![FieldError::new("email", "email is required")],
        );
        let (_, Json(body)) = service_error_to_http(error, false);
        let body = serde_json::to_value(body).unwrap();

        assert_eq!(body["error"]["error_type"], "validation_error");
        assert_eq!(
            body["error"]["details"],
            json!([{ "field": "email", "message": "email is required" }])
        );
    }
}
