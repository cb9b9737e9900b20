/// Configuration management for the API server
///
/// Configuration is read from environment variables (a `.env` file is loaded
/// first when present).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `SESSION_SECRET`: Cookie signing secret, at least 64 bytes (required)
/// - `SESSION_INACTIVITY_SECONDS`: Idle time before a session expires (default: 3600)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 3000)
/// - `API_PRODUCTION`: Enables secure cookies and HSTS (default: false)
/// - `PUBLIC_DIR`: Directory of static assets served at `/` (default: public)
/// - `RUST_LOG`: Log filter
/// - `LOG_FORMAT`: `json` for JSON log lines
///
/// # Example
///
/// ```no_run
/// use cinelog_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Minimum length of `SESSION_SECRET` in bytes
pub const MIN_SESSION_SECRET_LEN: usize = 64;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session configuration
    pub session: SessionConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Production mode: secure cookies and HSTS
    pub production: bool,

    /// Static assets directory
    pub public_dir: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session cookies
    ///
    /// IMPORTANT: Must be kept secret and be at least 64 bytes.
    /// Generate with: `openssl rand -hex 64`
    #[serde(skip_serializing)]
    pub secret: String,

    /// Idle time before a session expires
    pub inactivity_seconds: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_host = var_or("API_HOST", "0.0.0.0");
        let api_port = var_or("API_PORT", "3000").parse::<u16>()?;
        let production = var_or("API_PRODUCTION", "false").parse::<bool>()?;
        let public_dir = var_or("PUBLIC_DIR", "public");

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = var_or("DATABASE_MAX_CONNECTIONS", "10").parse::<u32>()?;

        let session_secret = lookup("SESSION_SECRET")
            .ok_or_else(|| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;

        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            anyhow::bail!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SESSION_SECRET_LEN
            );
        }

        let inactivity_seconds = var_or("SESSION_INACTIVITY_SECONDS", "3600").parse::<i64>()?;
        if inactivity_seconds <= 0 {
            anyhow::bail!("SESSION_INACTIVITY_SECONDS must be positive");
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                production,
                public_dir,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            session: SessionConfig {
                secret: session_secret,
                inactivity_seconds,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
