/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`; errors render as JSON:
///
/// ```json
/// { "success": false, "error": "unauthorized", "message": "invalid credentials" }
/// ```
///
/// `ApiError::Database` is the one variant that puts the raw storage message in
/// the `error` field. The movie CRUD routes use it on purpose so failures are
/// diagnosable from the client; every other internal failure is logged and
/// answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cinelog_shared::{
    auth::{password::PasswordError, AuthError},
    store::StoreError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Unauthorized (401) - failed login
    Unauthorized(String),

    /// Forbidden (403) - no session on a session-required route
    Forbidden(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Storage failure with the raw message exposed (500)
    Database(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Error code (e.g., "forbidden"), or the raw storage message
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    /// Wraps a storage failure, exposing its message to the client
    pub fn database(err: impl fmt::Display) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Database(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string(), msg, None)
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden".to_string(), msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error".to_string(),
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg,
                    "Database operation failed".to_string(),
                    None,
                )
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error".to_string(),
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: error_code,
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert storage errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert auth service errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingField(field) => ApiError::ValidationError(vec![ValidationErrorDetail {
                field: field.to_string(),
                message: format!("{} is required", field),
            }]),
            AuthError::DuplicateUser => ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "username".to_string(),
                message: err.to_string(),
            }]),
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Password(e) => e.into(),
            AuthError::Store(e) => e.into(),
        }
    }
}

/// Convert session store errors to API errors
impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        ApiError::InternalError(format!("Session operation failed: {}", err))
    }
}

/// Convert request validation errors to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Unauthorized("invalid credentials".to_string());
        assert_eq!(err.to_string(), "Unauthorized: invalid credentials");

        let err = ApiError::Forbidden("not authorized".to_string());
        assert_eq!(err.to_string(), "Forbidden: not authorized");
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized(msg) if msg == "invalid credentials"
        ));
        assert!(matches!(
            ApiError::from(AuthError::MissingField("username")),
            ApiError::ValidationError(details) if details[0].field == "username"
        ));
        assert!(matches!(
            ApiError::from(AuthError::DuplicateUser),
            ApiError::ValidationError(details) if details[0].message == "user already exists"
        ));
        assert!(matches!(
            ApiError::from(AuthError::Store(StoreError::Database("boom".to_string()))),
            ApiError::InternalError(_)
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_body() {
        let response = ApiError::Unauthorized("invalid credentials".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "unauthorized");
        assert_eq!(body["message"], "invalid credentials");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_database_error_exposes_raw_message() {
        let response = ApiError::database("relation \"movies\" does not exist").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "relation \"movies\" does not exist");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = ApiError::InternalError("password=hunter2".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert!(!body.to_string().contains("hunter2"));
    }
}
