/// Schema bootstrap
///
/// Creates the tables the application needs if they are missing. Every
/// statement is idempotent, so this runs on every startup. Existing tables are
/// never altered.

use sqlx::{Executor, PgPool};
use tracing::info;

/// DDL for the whole schema, executed as one simple-protocol batch
pub const SCHEMA: &str = r#"
DO $$
BEGIN
    CREATE TYPE user_role AS ENUM ('admin', 'user');
EXCEPTION
    WHEN duplicate_object THEN NULL;
END
$$;

CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username VARCHAR(255) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    role user_role NOT NULL DEFAULT 'user'
);

CREATE TABLE IF NOT EXISTS movies (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(255),
    director VARCHAR(255),
    year INTEGER,
    genre VARCHAR(100)
);

CREATE TABLE IF NOT EXISTS user_movies (
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    movie_id BIGINT NOT NULL REFERENCES movies(id) ON DELETE CASCADE,
    UNIQUE (user_id, movie_id)
);

CREATE TABLE IF NOT EXISTS access_logs (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL,
    accessed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS access_logs_user_id_idx ON access_logs (user_id);
"#;

/// Creates any missing tables and types
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring database schema");

    pool.execute(SCHEMA).await?;

    info!("Database schema ready");
    Ok(())
}
