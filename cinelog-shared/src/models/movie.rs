/// Movie model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE movies (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255),
///     director VARCHAR(255),
///     year INTEGER,
///     genre VARCHAR(100)
/// );
/// ```
///
/// Columns other than `id` are nullable: request bodies are stored as sent.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A movie row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
}

/// Input for creating a movie
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMovie {
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
}

impl Movie {
    /// Lists every movie, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(
            "SELECT id, title, director, year, genre FROM movies ORDER BY id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Inserts a movie and returns its ID
    pub async fn create(pool: &PgPool, data: CreateMovie) -> Result<i64, sqlx::Error> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO movies (title, director, year, genre)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(data.title)
        .bind(data.director)
        .bind(data.year)
        .bind(data.genre)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Deletes a movie by ID
    ///
    /// Returns `true` if a row was removed. Favourites referencing the movie are
    /// removed by the `ON DELETE CASCADE` foreign key.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
