//! # Cinelog Shared Library
//!
//! Domain types and business logic used by the Cinelog API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their PostgreSQL queries
//! - `store`: Storage abstraction (PostgreSQL and in-memory backends)
//! - `db`: Connection pool and schema bootstrap
//! - `auth`: Password hashing, session values and the auth service
//! - `access_logger`: Fire-and-forget access logging for the usage ranking

pub mod access_logger;
pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the Cinelog shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
