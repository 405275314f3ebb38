//! In-memory credential store.
//!
//! Used by tests and by embedders that need no persistence. The email check
//! and the insert happen under one write lock, matching the atomicity of the
//! SQLite unique constraint.

use crate::database::models::{NewUser, ProfileUpdate, User};
use crate::errors::StoreError;
use crate::repositories::UserStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = user.into_user();
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: &str,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        update.apply_to(user, updated_at);
        Ok(user.clone())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.users.read().await.len() as i64)
    }

    async fn ping(&self) -> bool {
        true
    }
}
