//! Core business logic for the authentication system.

use crate::AppState;
use crate::auth::models::*;
use crate::database::models::{NewUser, Role, UserProfile};
use crate::errors::{FieldError, ServiceError, ServiceResult};
use crate::repositories::UserStore;
use crate::utils::jwt::{Claims, TokenError, TokenService};
use crate::utils::password::PasswordHasher;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication service for registration, login and profile updates
pub struct AuthService<'a> {
    store: &'a dyn UserStore,
    tokens: &'a TokenService,
    hasher: PasswordHasher,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(store: &'a dyn UserStore, tokens: &'a TokenService, hasher: PasswordHasher) -> Self {
        AuthService {
            store,
            tokens,
            hasher,
        }
    }

    /// Borrow the collaborators held by the shared application state
    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(state.store.as_ref(), state.tokens.as_ref(), state.hasher)
    }

    /// Register a new user. No token is issued; the caller logs in separately.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserProfile> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            let fields = missing
                .iter()
                .map(|field| FieldError::new(*field, format!("{} is required", field)))
                .collect();
            return Err(ServiceError::validation_with_fields(
                "Missing required fields",
                fields,
            ));
        }

        request.validate().map_err(ServiceError::from_validation)?;

        let RegisterRequest {
            name,
            email,
            password,
            role,
            department,
            region,
            phone,
        } = request;
        // Presence was checked above.
        let (name, email, password, role, region, phone) = (
            name.unwrap_or_default(),
            email.unwrap_or_default(),
            password.unwrap_or_default(),
            role.unwrap_or_default(),
            region.unwrap_or_default(),
            phone.unwrap_or_default(),
        );

        let role = role.parse::<Role>().map_err(|_| {
            ServiceError::validation_with_fields(
                "Invalid role",
                vec![FieldError::new(
                    "role",
                    format!(
                        "role must be one of: {}",
                        Role::ALL.map(|r| r.as_str()).join(", ")
                    ),
                )],
            )
        })?;

        if self.store.find_by_email(&email).await?.is_some() {
            debug!("Registration rejected, email already in use");
            return Err(ServiceError::already_exists("User", "email"));
        }

        let password_hash = self.hasher.hash(&password).await?;

        // A concurrent registration can still win the race after the lookup
        // above; the store's uniqueness check reports it as DuplicateEmail.
        let user = self
            .store
            .insert(NewUser {
                id: Uuid::now_v7().to_string(),
                name,
                email,
                password_hash,
                role,
                department: non_empty(department),
                region,
                phone,
                created_at: Utc::now(),
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user.into())
    }

    /// Verify credentials and issue a 24-hour bearer token
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let (email, password) = request.credentials()?;

        let Some(user) = self.store.find_by_email(email).await? else {
            debug!("Login rejected, unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            debug!(user_id = %user.id, "Login rejected, wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&user.id, &user.email, &user.role)
            .map_err(|e| ServiceError::internal_error(e.to_string()))?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    /// Resolve an `Authorization` header value into verified claims.
    ///
    /// Missing header, bad signature and expiry all surface as `Unauthorized`;
    /// the specific cause is only logged.
    pub fn authenticate(&self, authorization: Option<&str>) -> ServiceResult<Claims> {
        let token = authorization
            .and_then(|header| header.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ServiceError::unauthorized("Authorization token required"))?;

        self.tokens.verify(token).map_err(|error| {
            match error {
                TokenError::Expired => debug!("Rejected expired token"),
                other => warn!("Rejected token: {}", other),
            }
            ServiceError::unauthorized("Invalid or expired token")
        })
    }

    /// Overwrite the caller's editable profile fields
    pub async fn update_profile(
        &self,
        claims: &Claims,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserProfile> {
        let update = request.into_update()?;

        let user = self
            .store
            .update_profile(claims.user_id(), &update, Utc::now())
            .await?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user.into())
    }
}
