//! Credential store abstraction and its implementations.
//!
//! Services depend on [`UserStore`] rather than a concrete pool so the
//! SQLite repository can be swapped for the in-memory one in tests.

use crate::database::models::{NewUser, ProfileUpdate, User};
use crate::errors::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod memory_repository;
pub mod user_repository;

pub use memory_repository::InMemoryUserStore;
pub use user_repository::UserRepository;

/// Persistence contract for user records keyed by unique email.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Looks up a user by id.
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Inserts a new user.
    ///
    /// Must fail with [`StoreError::DuplicateEmail`] when the email is taken,
    /// atomically with the write itself.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Overwrites the editable profile columns of `id`.
    ///
    /// Fails with [`StoreError::NotFound`] when no row matches.
    async fn update_profile(
        &self,
        id: &str,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<User, StoreError>;

    /// Number of stored users.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Whether the backing connection is currently usable.
    async fn ping(&self) -> bool;
}
