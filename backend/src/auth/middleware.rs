//! Middleware for protecting authenticated routes and handling authorization.
//!
//! This module contains logic for validating authentication tokens and
//! attaching the authenticated identity to the request before any protected
//! handler runs.

use crate::errors::ServiceError;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated identity extracted from a validated token.
///
/// Created by [`jwt_auth`] and inserted into the request extensions; handlers
/// consume it and it is discarded with the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
}

/// JWT authentication middleware.
///
/// Rejects the request with 401 before invoking the token codec when the
/// Authorization header is absent or not a Bearer value. The token itself is
/// never logged.
pub async fn jwt_auth(
    Extension(jwt_utils): Extension<Arc<JwtUtils>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ServiceError::unauthenticated("Authentication required"))?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ServiceError::unauthenticated("Authentication required"))?;

    // Validate JWT token and attach the identity for use in handlers
    let claims = jwt_utils.validate_token(token)?;

    request.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
    });

    Ok(next.run(request).await)
}
