/// Authentication endpoints
///
/// This module provides the session lifecycle:
/// - Registration
/// - Login (establishes the session)
/// - Logout (destroys it)
///
/// # Endpoints
///
/// - `POST /auth/register` - Register new user
/// - `POST /auth/login` - Login and receive the session cookie
/// - `POST /auth/logout` - End the session

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use cinelog_shared::{
    auth::{AuthError, SESSION_USER_KEY},
    models::Role,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username (unique)
    #[serde(default)]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    /// Plaintext password, hashed before storage
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Whether the account was created
    pub success: bool,

    /// Reason for a refused registration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always true; failures are answered with 401
    pub success: bool,

    /// Role of the authenticated user
    pub role: Role,
}

/// Logout response
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Always true
    pub success: bool,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true }
/// ```
///
/// A taken username is answered with 200 and
/// `{ "success": false, "message": "user already exists" }`.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: empty username or password
/// - `500 Internal Server Error`: hashing or storage failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate()?;

    match state.auth.register(&req.username, &req.password).await {
        Ok(_) => Ok(Json(RegisterResponse {
            success: true,
            message: None,
        })),
        Err(AuthError::DuplicateUser) => Ok(Json(RegisterResponse {
            success: false,
            message: Some(AuthError::DuplicateUser.to_string()),
        })),
        Err(e) => Err(e.into()),
    }
}

/// Login and establish a session
///
/// On success the session ID is rotated before the identity is stored, so a
/// cookie obtained before login never becomes an authenticated one.
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "role": "user" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown username or wrong password (same body for both)
/// - `500 Internal Server Error`: storage or session failure
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session_user = state.auth.login(&req.username, &req.password).await?;

    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, session_user).await?;

    Ok(Json(LoginResponse {
        success: true,
        role: session_user.role,
    }))
}

/// End the current session
///
/// Idempotent: succeeds whether or not a session exists.
pub async fn logout(session: Session) -> Json<LogoutResponse> {
    if let Err(e) = session.flush().await {
        warn!(error = %e, "Failed to flush session on logout");
    }

    Json(LogoutResponse { success: true })
}
