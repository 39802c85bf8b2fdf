//! Handler functions for user management API endpoints.
//!
//! These functions process requests for user data, delegate to the user
//! service, and return user-specific information. Every handler here runs
//! behind the authentication middleware and receives the authenticated
//! identity through `AuthContext`.

use crate::auth::middleware::AuthContext;
use crate::database::models::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::errors::ServiceError;
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use sqlx::SqlitePool;

/// Creates a new user.
#[axum::debug_handler]
pub async fn create_user(
    Extension(ctx): Extension<AuthContext>,
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ServiceError> {
    tracing::info!("User creation requested by {}", ctx.user_id);

    let user_service = UserService::new(&pool);
    let user = user_service.create_user(payload).await?;

    tracing::info!("User created: {}", user.id);
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Retrieves all users.
#[axum::debug_handler]
pub async fn get_all_users(
    Extension(ctx): Extension<AuthContext>,
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<Vec<UserResponse>>, ServiceError> {
    tracing::info!("User listing requested by {}", ctx.user_id);

    let user_service = UserService::new(&pool);
    let users = user_service.get_all_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Retrieves a user by its ID.
#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(ctx): Extension<AuthContext>,
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ServiceError> {
    tracing::info!("Getting user by ID: {} for user: {}", id, ctx.user_id);

    let user_service = UserService::new(&pool);
    let user = user_service.get_user_required(&id).await?;

    Ok(Json(user.into()))
}

/// Applies a partial update to a user.
#[axum::debug_handler]
pub async fn update_user(
    Extension(ctx): Extension<AuthContext>,
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ServiceError> {
    tracing::info!("Updating user: {} for user: {}", id, ctx.user_id);

    let user_service = UserService::new(&pool);
    let user = user_service.update_user(&id, payload).await?;

    Ok(Json(user.into()))
}

/// Deletes a user.
#[axum::debug_handler]
pub async fn delete_user(
    Extension(ctx): Extension<AuthContext>,
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    tracing::info!("Deleting user: {} for user: {}", id, ctx.user_id);

    let user_service = UserService::new(&pool);
    user_service.delete_user(&id).await?;

    Ok(Json(serde_json::json!({
        "message": "User deleted successfully"
    })))
}
