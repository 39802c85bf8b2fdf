//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for user authentication
//! (registration, login, current-user lookup), parse request data, and
//! interact with the `auth::service` for core business logic.

use crate::auth::middleware::AuthContext;
use crate::auth::models::{LoginRequest, LoginResponse};
use crate::auth::service::AuthService;
use crate::database::models::{CreateUserRequest, UserResponse};
use crate::errors::ServiceError;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, ResponseJson<LoginResponse>), ServiceError> {
    let auth_service = AuthService::new(&pool, &jwt_utils);
    let response = auth_service.register(payload).await?;

    tracing::info!("Registered user {}", response.user.id);
    Ok((StatusCode::CREATED, ResponseJson(response)))
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, ServiceError> {
    let auth_service = AuthService::new(&pool, &jwt_utils);
    let response = auth_service.login(payload).await?;

    tracing::info!("User {} logged in", response.user.id);
    Ok(ResponseJson(response))
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<ResponseJson<UserResponse>, ServiceError> {
    let auth_service = AuthService::new(&pool, &jwt_utils);
    let user = auth_service.me(&ctx.user_id).await?;

    Ok(ResponseJson(user))
}
