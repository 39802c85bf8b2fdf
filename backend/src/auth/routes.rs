//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle endpoints for user registration, login, and the
//! current-user lookup. They are designed to be integrated into the main
//! Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::utils::jwt::JwtUtils;
    use axum::{
        body::{Body, to_bytes},
        extract::Extension,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let jwt_utils = Arc::new(JwtUtils::new(&Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "auth-routes-test-secret".to_string(),
            jwt_expires_in_seconds: 3600,
            server_port: 0,
        }));

        Router::new()
            .nest("/api/auth", auth_router())
            .layer(Extension(pool))
            .layer(Extension(jwt_utils))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                json!({
                    "username": "alice",
                    "email": "alice@example.com",
                    "password": "correct-horse"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let registered = json_body(response).await;
        assert!(registered["access_token"].is_string());
        assert_eq!(registered["user"]["username"], "alice");
        assert!(registered["user"].get("password_hash").is_none());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({ "username": "alice", "password": "correct-horse" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let logged_in = json_body(response).await;
        let token = logged_in["access_token"].as_str().unwrap().to_string();

        // The issued token authorizes the protected current-user route.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let me = json_body(response).await;
        assert_eq!(me["username"], "alice");
        assert!(me.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password_matches_unknown_user() {
        let app = test_app().await;

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                json!({
                    "username": "alice",
                    "email": "alice@example.com",
                    "password": "correct-horse"
                }),
            ))
            .await
            .unwrap();

        let wrong = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({ "username": "alice", "password": "nope" }),
            ))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let unknown = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({ "username": "nobody", "password": "nope" }),
            ))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

        // Responses must not reveal which usernames exist.
        assert_eq!(json_body(wrong).await, json_body(unknown).await);
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let app = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({ "username": "alice" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("Password"));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let app = test_app().await;

        let payload = json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "correct-horse"
        });

        let first = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/register", payload.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(json_request("POST", "/api/auth/register", payload))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
