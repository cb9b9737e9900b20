/// PostgreSQL storage backend
///
/// Thin delegation to the model queries; all SQL lives in [`crate::models`].

use super::{Store, StoreResult};
use crate::models::{
    favorite::Favorite, AccessLogEntry, CreateMovie, CreateUser, Movie, RankingRow, User,
};
use async_trait::async_trait;
use sqlx::PgPool;

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an open pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn create_user_if_absent(&self, data: CreateUser) -> StoreResult<bool> {
        Ok(User::create_if_absent(&self.pool, data).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_username(&self.pool, username).await?)
    }

    async fn append_access_log(&self, user_id: i64) -> StoreResult<AccessLogEntry> {
        Ok(AccessLogEntry::append(&self.pool, user_id).await?)
    }

    async fn access_ranking(&self) -> StoreResult<Vec<RankingRow>> {
        Ok(AccessLogEntry::ranking(&self.pool).await?)
    }

    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        Ok(Movie::list(&self.pool).await?)
    }

    async fn create_movie(&self, data: CreateMovie) -> StoreResult<i64> {
        Ok(Movie::create(&self.pool, data).await?)
    }

    async fn delete_movie(&self, id: i64) -> StoreResult<bool> {
        Ok(Movie::delete(&self.pool, id).await?)
    }

    async fn add_favorite(&self, user_id: i64, movie_id: i64) -> StoreResult<()> {
        Favorite::add(&self.pool, user_id, movie_id).await?;
        Ok(())
    }

    async fn list_favorites(&self, user_id: i64) -> StoreResult<Vec<Movie>> {
        Ok(Favorite::list_movies(&self.pool, user_id).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::db::pool::health_check(&self.pool).await?)
    }
}
