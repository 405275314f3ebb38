//! Password hashing via bcrypt.
//!
//! bcrypt is deliberately slow, so both operations run on the blocking pool
//! instead of stalling the async workers.

use crate::errors::{ServiceError, ServiceResult};

/// Work factor used when nothing else is configured.
pub const DEFAULT_COST: u32 = 10;
/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Salted one-way password hashing.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// Returns `ServiceError::InternalError` if hashing fails
    pub async fn hash(&self, plaintext: &str) -> ServiceResult<String> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Checks a plaintext password against a stored digest.
    ///
    /// # Returns
    /// `true` if the password matches, `false` otherwise
    ///
    /// # Errors
    /// Returns `ServiceError::InternalError` if the digest is malformed
    pub async fn verify(&self, plaintext: &str, digest: &str) -> ServiceResult<bool> {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest))
            .await
            .map_err(|e| {
                ServiceError::internal_error(format!("Password verification task failed: {}", e))
            })?
            .map_err(|e| ServiceError::internal_error(format!("Password verification failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(MIN_COST);
        let digest = hasher.hash("secret1").await.unwrap();

        assert_ne!(digest, "secret1");
        assert!(hasher.verify("secret1", &digest).await.unwrap());
        assert!(!hasher.verify("secret2", &digest).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new(MIN_COST);
        let first = hasher.hash("secret1").await.unwrap();
        let second = hasher.hash("secret1").await.unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &second).await.unwrap());
    }

    #[tokio::test]
    async fn test_default_cost_is_ten() {
        let digest = PasswordHasher::default().hash("secret1").await.unwrap();
        assert!(digest.starts_with("$2b$10$"));
    }

    #[tokio::test]
    async fn test_malformed_digest_is_internal_error() {
        let hasher = PasswordHasher::new(MIN_COST);
        let err = hasher.verify("secret1", "not-a-hash").await.unwrap_err();
        assert!(matches!(err, ServiceError::InternalError { .. }));
    }

    #[tokio::test]
    async fn test_invalid_cost_is_internal_error() {
        let err = PasswordHasher::new(MAX_COST + 1)
            .hash("secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InternalError { .. }));
    }
}
