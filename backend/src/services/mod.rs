//! Business logic services sitting between API handlers and repositories.

pub mod user_service;
