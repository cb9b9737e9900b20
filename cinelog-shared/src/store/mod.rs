/// Storage abstraction
///
/// Services and handlers receive an `Arc<dyn Store>` instead of a global
/// connection. The handle is created at startup and dropped at shutdown.
///
/// # Backends
///
/// - [`PgStore`]: PostgreSQL via the model queries in [`crate::models`]
/// - [`InMemoryStore`]: process-local maps, used by tests and local demos
///
/// # Example
///
/// ```
/// use cinelog_shared::store::{InMemoryStore, Store};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
/// let movies = store.list_movies().await?;
/// assert!(movies.is_empty());
/// # Ok(())
/// # }
/// ```

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

use crate::models::{AccessLogEntry, CreateMovie, CreateUser, Movie, RankingRow, User};
use async_trait::async_trait;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key rejected the write
    #[error("Foreign key violated: {0}")]
    ForeignKeyViolation(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(String),

    /// The backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    StoreError::UniqueViolation(db_err.message().to_string())
                } else if db_err.is_foreign_key_violation() {
                    StoreError::ForeignKeyViolation(db_err.message().to_string())
                } else {
                    StoreError::Database(db_err.to_string())
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// Persistence operations used by the application
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Inserts a user; a taken username yields [`StoreError::UniqueViolation`]
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Inserts a user unless the username exists; returns whether a row was added
    async fn create_user_if_absent(&self, data: CreateUser) -> StoreResult<bool>;

    /// Looks a user up by username
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Appends one access log entry
    async fn append_access_log(&self, user_id: i64) -> StoreResult<AccessLogEntry>;

    /// Users ranked by access count, most active first
    async fn access_ranking(&self) -> StoreResult<Vec<RankingRow>>;

    /// Every movie, newest first
    async fn list_movies(&self) -> StoreResult<Vec<Movie>>;

    /// Inserts a movie and returns its ID
    async fn create_movie(&self, data: CreateMovie) -> StoreResult<i64>;

    /// Deletes a movie (and its favourites); returns whether it existed
    async fn delete_movie(&self, id: i64) -> StoreResult<bool>;

    /// Marks a movie as a favourite; an existing pair is a no-op
    async fn add_favorite(&self, user_id: i64, movie_id: i64) -> StoreResult<()>;

    /// Favourite movies of a user
    async fn list_favorites(&self, user_id: i64) -> StoreResult<Vec<Movie>>;

    /// Checks that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;
}
