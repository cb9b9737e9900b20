/// Database models for Cinelog
///
/// Each model owns its SQL. The [`crate::store`] layer wraps these calls behind
/// the `Store` trait so handlers never see a pool directly.
///
/// # Models
///
/// - `user`: Accounts, password hashes and roles
/// - `movie`: The movie catalogue
/// - `favorite`: Per-user favourite movies (`user_movies`)
/// - `access_log`: Append-only access log and the usage ranking

pub mod access_log;
pub mod favorite;
pub mod movie;
pub mod user;

pub use access_log::{AccessLogEntry, RankingRow};
pub use movie::{CreateMovie, Movie};
pub use user::{CreateUser, Role, User};
