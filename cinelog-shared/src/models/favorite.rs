/// Per-user favourite movies
///
/// # Schema
///
/// ```sql
/// CREATE TABLE user_movies (
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     movie_id BIGINT NOT NULL REFERENCES movies(id) ON DELETE CASCADE,
///     UNIQUE (user_id, movie_id)
/// );
/// ```

use super::movie::Movie;
use sqlx::PgPool;

/// Favourite operations (the `user_movies` join table)
pub struct Favorite;

impl Favorite {
    /// Marks a movie as a favourite of a user
    ///
    /// Adding an existing pair is a no-op. Returns `true` if a row was inserted.
    pub async fn add(pool: &PgPool, user_id: i64, movie_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_movies (user_id, movie_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the favourite movies of a user
    pub async fn list_movies(pool: &PgPool, user_id: i64) -> Result<Vec<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.id, m.title, m.director, m.year, m.genre
            FROM movies m
            JOIN user_movies um ON m.id = um.movie_id
            WHERE um.user_id = $1
            ORDER BY m.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
