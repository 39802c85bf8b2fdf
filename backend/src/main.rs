//! Main entry point for the user API backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and registers all API routes and middleware. It orchestrates
//! the application's startup and defines its overall structure: requests pass
//! through the authentication middleware, then the resource router, then a
//! handler, and every error funnels through the centralized translation in
//! `errors`.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use axum::{Extension, Router, http::StatusCode, http::Uri, response::Json, routing::get};
use config::Config;
use database::Database;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;
use utils::jwt::JwtUtils;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    let pool = db.pool().clone();

    // Signing secret and pool are constructed once and injected; nothing
    // below reads the environment again.
    let jwt_utils = Arc::new(JwtUtils::new(&config));

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth", auth::routes::auth_router())
        .nest("/api/users", api::user::routes::user_router().await)
        .fallback(fallback_handler)
        .layer(Extension(pool))
        .layer(Extension(jwt_utils));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .unwrap();

    info!("Starting user API server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "User API Backend",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn fallback_handler(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("No route for {}", uri.path()) })),
    )
}
