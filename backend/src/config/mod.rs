//! Central module for application-wide configuration settings.
//!
//! Configuration is read from the environment once at startup and treated as
//! immutable afterwards; the signing secret and store settings are passed
//! explicitly into the components that need them.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL not set")?,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout_seconds: parse_var("DB_ACQUIRE_TIMEOUT_SECONDS", 3)?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET not set")?,
            jwt_expires_in_seconds: parse_var("JWT_EXPIRES_IN_SECONDS", 86400)?,
            server_port: parse_var("SERVER_PORT", 3000)?,
        })
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .ok()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}
