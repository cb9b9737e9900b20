/// Access log model and ranking query
///
/// Append-only: rows are inserted by the access logger and never updated or
/// deleted by the application.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE access_logs (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL,
///     accessed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `user_id` has no foreign key: entries may outlive the user they name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// One authenticated request under the logged path prefix
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccessLogEntry {
    pub id: i64,
    pub user_id: i64,
    pub accessed_at: DateTime<Utc>,
}

/// One row of the usage ranking
///
/// `acessos` is the field name clients of the dashboard expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RankingRow {
    pub username: String,
    pub acessos: i64,
}

impl AccessLogEntry {
    /// Appends an entry for `user_id`
    pub async fn append(pool: &PgPool, user_id: i64) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, AccessLogEntry>(
            r#"
            INSERT INTO access_logs (user_id)
            VALUES ($1)
            RETURNING id, user_id, accessed_at
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Ranks users by number of logged accesses, most active first
    ///
    /// Users without any entry are not listed. Ties are ordered by username.
    pub async fn ranking(pool: &PgPool) -> Result<Vec<RankingRow>, sqlx::Error> {
        sqlx::query_as::<_, RankingRow>(
            r#"
            SELECT u.username, COUNT(l.id) AS acessos
            FROM users u
            JOIN access_logs l ON u.id = l.user_id
            GROUP BY u.id, u.username
            ORDER BY acessos DESC, u.username ASC
            "#,
        )
        .fetch_all(pool)
        .await
    }
}
