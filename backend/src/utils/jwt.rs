//! JWT token utilities for authentication.
//!
//! Tokens are HS256-signed, stateless and live for exactly 24 hours. Nothing
//! is stored server-side, so a token stays valid until it expires or the
//! signing secret changes.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of every issued token.
pub const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// JWT Claims structure carrying the caller's identity
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed or its signature does not verify")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("token could not be signed: {0}")]
    Signing(String),
}

/// Issues and verifies bearer tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `verify_at` against an explicit clock.
        validation.validate_exp = false;
        validation.leeway = 0;

        TokenService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issues a token for the given identity, valid for 24 hours from now.
    pub fn issue(&self, user_id: &str, email: &str, role: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, role, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: &str,
        email: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies signature and expiry against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies signature and expiry as if the current time were `now`.
    ///
    /// A token is rejected from its `exp` second onwards.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)?;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret")
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service();
        let token = tokens.issue("u1", "a@x.com", "farmer").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.user_id(), "u1");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, "farmer");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_expiry_boundary_at_24_hours() {
        let tokens = service();
        let issued = Utc::now();
        let token = tokens.issue_at("u1", "a@x.com", "farmer", issued).unwrap();

        let almost = issued + Duration::hours(23) + Duration::minutes(59);
        assert!(tokens.verify_at(&token, almost).is_ok());

        let last_second = issued + Duration::seconds(TOKEN_TTL_SECONDS - 1);
        assert!(tokens.verify_at(&token, last_second).is_ok());

        let past = issued + Duration::hours(24) + Duration::seconds(1);
        assert_eq!(tokens.verify_at(&token, past), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let tokens = service();
        let token = tokens.issue("u1", "a@x.com", "farmer").unwrap();

        // Flip one character inside the signature segment.
        let mut bytes = token.into_bytes();
        let index = bytes.len() - 5;
        bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(tokens.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = TokenService::new("other-secret")
            .issue("u1", "a@x.com", "farmer")
            .unwrap();
        assert_eq!(service().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(service().verify("not.a.token"), Err(TokenError::Invalid));
        assert_eq!(service().verify(""), Err(TokenError::Invalid));
    }
}
