//! Core business logic for the authentication system.

use crate::api::common::validation_error;
use crate::auth::models::{LoginRequest, LoginResponse};
use crate::database::models::{CreateUserRequest, UserResponse};
use crate::errors::ServiceResult;
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for handling registration, login, and token
/// issuance. The token codec is injected; this service holds no state of its
/// own beyond the borrowed pool.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt_utils: &'a JwtUtils,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, jwt_utils: &'a JwtUtils) -> Self {
        AuthService { pool, jwt_utils }
    }

    /// Register a new user and issue an access token for it.
    pub async fn register(&self, request: CreateUserRequest) -> ServiceResult<LoginResponse> {
        let user_service = UserService::new(self.pool);
        let user = user_service.create_user(request).await?;

        let access_token = self.jwt_utils.generate_token(&user.id)?;

        Ok(LoginResponse {
            access_token,
            expires_in: self.jwt_utils.expires_in_seconds(),
            user: user.into(),
        })
    }

    /// Authenticate a user and issue an access token.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginResponse> {
        // Validate input
        if let Err(validation_errors) = login_request.validate() {
            return Err(validation_error(validation_errors));
        }

        let username = login_request.username.unwrap_or_default();
        let password = login_request.password.unwrap_or_default();

        // Authenticate user using UserService
        let user_service = UserService::new(self.pool);
        let user = user_service.authenticate_user(&username, &password).await?;

        let access_token = self.jwt_utils.generate_token(&user.id)?;

        Ok(LoginResponse {
            access_token,
            expires_in: self.jwt_utils.expires_in_seconds(),
            user: user.into(),
        })
    }

    /// Load the profile of the authenticated user.
    pub async fn me(&self, user_id: &str) -> ServiceResult<UserResponse> {
        let user_service = UserService::new(self.pool);
        let user = user_service.get_user_required(user_id).await?;

        Ok(user.into())
    }
}
