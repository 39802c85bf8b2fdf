//! Defines the HTTP routes for user management.
//!
//! These routes provide the CRUD endpoints for user records. Every route is
//! guarded by the JWT authentication middleware; a request that fails
//! authentication never reaches a handler.

use super::handlers::{create_user, delete_user, get_all_users, get_user_by_id, update_user};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub async fn user_router() -> Router {
    Router::new()
        .route(
            "/",
            post(create_user)
                .get(get_all_users)
                .layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/{id}",
            get(get_user_by_id)
                .put(update_user)
                .delete(delete_user)
                .layer(middleware::from_fn(jwt_auth)),
        )
}
