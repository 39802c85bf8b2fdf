//! Persistence layer: repositories owning all database statements.

pub mod user_repository;
