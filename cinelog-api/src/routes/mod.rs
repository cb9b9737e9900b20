/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `setup`: One-time admin bootstrap
/// - `auth`: Session endpoints (register, login, logout)
/// - `movies`: Movie CRUD under `/api/movies`
/// - `dashboard`: Favourites and the usage ranking

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod movies;
pub mod setup;
