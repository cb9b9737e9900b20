/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('admin', 'user');
///
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL,
///     role user_role NOT NULL DEFAULT 'user'
/// );
/// ```
///
/// The `password` column holds the Argon2id PHC string, never plaintext.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Created only by the admin bootstrap
    Admin,

    /// Default role for registered accounts
    #[default]
    User,
}

impl Role {
    /// Returns the role as its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Database-assigned ID
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Argon2id password hash
    #[sqlx(rename = "password")]
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account role
    pub role: Role,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name (must be unique)
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Account role
    pub role: Role,
}

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Fails with a unique violation if the username is taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, role
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.role)
        .fetch_one(pool)
        .await
    }

    /// Inserts a user unless the username already exists
    ///
    /// Returns `true` if a row was inserted. An existing row is left untouched.
    pub async fn create_if_absent(pool: &PgPool, data: CreateUser) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.role)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds a user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }
}
