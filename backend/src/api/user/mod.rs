//! Module for user management API endpoints.
//!
//! This module handles the CRUD surface for user records; all routes here
//! sit behind the authentication middleware.

pub mod handlers;
pub mod routes;
