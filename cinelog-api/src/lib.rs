//! # Cinelog API Server Library
//!
//! This library provides the HTTP layer of Cinelog: session-based
//! authentication, the movie catalogue, favourites and the usage ranking.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Interceptor chain and security headers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
