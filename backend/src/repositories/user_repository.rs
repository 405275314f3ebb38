//! SQLite-backed credential store.
//!
//! Provides the persistence operations for dashboard users.

use crate::database::models::{NewUser, ProfileUpdate, User};
use crate::errors::StoreError;
use crate::repositories::UserStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool, cloned handles share connections
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            StoreError::DuplicateEmail
        }
        _ => StoreError::Database(error),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, department, region, district,
                   phone, created_at, updated_at
            FROM users WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, department, region, district,
                   phone, created_at, updated_at
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, department, region,
                               phone, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, email, password_hash, role, department, region, district,
                      phone, created_at, updated_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.department)
        .bind(&user.region)
        .bind(&user.phone)
        .bind(user.created_at)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: &str,
        update: &ProfileUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = ?, phone = ?, department = ?, region = ?, district = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, email, password_hash, role, department, region, district,
                      phone, created_at, updated_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.phone)
        .bind(&update.department)
        .bind(&update.region)
        .bind(&update.district)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> bool {
        if self.pool.is_closed() {
            return false;
        }
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::database::models::Role;

    async fn repository() -> UserRepository {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        UserRepository::new(db.pool().clone())
    }

    fn new_user(id: &str, email: &str) -> NewUser {
        NewUser {
            id: id.to_string(),
            name: "Asha".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::Farmer,
            department: None,
            region: "Tamil Nadu".to_string(),
            phone: "+911234567890".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = repository().await;
        let created = repo.insert(new_user("u1", "a@x.com")).await.unwrap();

        assert_eq!(created.role, "farmer");
        assert_eq!(created.district, None);

        let by_email = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, "u1");
        let by_id = repo.get_by_id("u1").await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");
        assert!(repo.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_constraint_reports_duplicate() {
        let repo = repository().await;
        repo.insert(new_user("u1", "a@x.com")).await.unwrap();

        let err = repo.insert(new_user("u2", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_overwrites_with_nulls() {
        let repo = repository().await;
        repo.insert(new_user("u1", "a@x.com")).await.unwrap();

        let update = ProfileUpdate {
            name: "A2".to_string(),
            phone: None,
            department: None,
            region: None,
            district: Some("Chennai".to_string()),
        };
        let updated = repo.update_profile("u1", &update, Utc::now()).await.unwrap();

        assert_eq!(updated.name, "A2");
        assert_eq!(updated.region, None);
        assert_eq!(updated.phone, None);
        assert_eq!(updated.district.as_deref(), Some("Chennai"));
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let repo = repository().await;
        let update = ProfileUpdate {
            name: "Ghost".to_string(),
            phone: None,
            department: None,
            region: None,
            district: None,
        };

        let err = repo
            .update_profile("missing", &update, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_ping_reflects_pool_state() {
        let repo = repository().await;
        assert!(repo.ping().await);

        repo.pool.close().await;
        assert!(!repo.ping().await);
    }
}
