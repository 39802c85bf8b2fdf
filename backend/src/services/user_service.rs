//! User business logic service.
//!
//! Handles all user-related business operations: creation with duplicate
//! checks and password hashing, lookups, partial updates, deletion, and
//! credential verification for login.

use crate::api::common::validation_error;
use crate::database::models::{CreateUser, CreateUserRequest, UpdateUserRequest, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user with full validation.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures (missing/invalid fields)
    /// - Duplicate username or email
    /// - Password hashing failures
    pub async fn create_user(&self, create_user: CreateUserRequest) -> ServiceResult<User> {
        // Input validation using validator crate
        if let Err(validation_errors) = create_user.validate() {
            return Err(validation_error(validation_errors));
        }

        let username = create_user.username.unwrap_or_default();
        let email = create_user.email.unwrap_or_default();
        let password = create_user.password.unwrap_or_default();

        let repo = UserRepository::new(self.pool);

        // Check if user already exists
        if repo.get_user_by_username(&username).await?.is_some() {
            return Err(ServiceError::already_exists("User", &username));
        }
        if repo.get_user_by_email(&email).await?.is_some() {
            return Err(ServiceError::already_exists("User", &email));
        }

        let password_hash = hash(&password, DEFAULT_COST)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))?;

        let user = repo
            .create_user(CreateUser {
                id: Uuid::now_v7().to_string(),
                username,
                email,
                password_hash,
            })
            .await?;

        Ok(user)
    }

    /// Retrieves a user by ID, failing with `NotFound` when absent.
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        repo.get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))
    }

    /// Retrieves all users.
    pub async fn get_all_users(&self) -> ServiceResult<Vec<User>> {
        let repo = UserRepository::new(self.pool);

        Ok(repo.get_all_users().await?)
    }

    /// Applies a partial update to a user. Only the provided fields change;
    /// a new password is re-hashed before storage.
    pub async fn update_user(&self, id: &str, update: UpdateUserRequest) -> ServiceResult<User> {
        if let Err(validation_errors) = update.validate() {
            return Err(validation_error(validation_errors));
        }

        // Nothing to merge; still confirms the user exists.
        if update.is_empty() {
            return self.get_user_required(id).await;
        }

        let repo = UserRepository::new(self.pool);

        // Reject updates that would collide with another user's identity.
        if let Some(ref username) = update.username {
            if let Some(existing) = repo.get_user_by_username(username).await? {
                if existing.id != id {
                    return Err(ServiceError::already_exists("User", username));
                }
            }
        }
        if let Some(ref email) = update.email {
            if let Some(existing) = repo.get_user_by_email(email).await? {
                if existing.id != id {
                    return Err(ServiceError::already_exists("User", email));
                }
            }
        }

        let password_hash = match update.password {
            Some(ref password) => Some(hash(password, DEFAULT_COST).map_err(|e| {
                ServiceError::internal_error(format!("Password hashing failed: {}", e))
            })?),
            None => None,
        };

        let user = repo
            .update_user(
                id,
                update.username.as_deref(),
                update.email.as_deref(),
                password_hash.as_deref(),
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        Ok(user)
    }

    /// Soft deletes a user, failing with `NotFound` when no active row
    /// matches. Repeated deletes of the same id keep returning `NotFound`.
    pub async fn delete_user(&self, id: &str) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);

        if !repo.delete_user(id).await? {
            return Err(ServiceError::not_found("User", id));
        }

        Ok(())
    }

    /// Verifies login credentials.
    ///
    /// Unknown username and wrong password return the same error so the API
    /// does not reveal which usernames exist.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        let user = repo
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::unauthenticated("Invalid username or password"))?;

        let password_valid = verify(password, &user.password_hash)
            .map_err(|e| ServiceError::internal_error(format!("Password check failed: {}", e)))?;

        if !password_valid {
            return Err(ServiceError::unauthenticated("Invalid username or password"));
        }

        if !user.is_active {
            return Err(ServiceError::validation("User account is inactive"));
        }

        Ok(user)
    }
}
