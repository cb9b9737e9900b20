/// Auth service: registration, login and the admin bootstrap
///
/// The service works on the injected [`Store`] and returns plain values; the
/// HTTP layer is responsible for writing the resulting [`SessionUser`] into
/// the session.
///
/// # Login failures
///
/// "No such user" and "wrong password" both produce
/// [`AuthError::InvalidCredentials`]. When the user does not exist the
/// password is still verified against a fixed dummy hash, so both paths do a
/// full Argon2 verification.
///
/// # Example
///
/// ```
/// use cinelog_shared::auth::service::AuthService;
/// use cinelog_shared::store::InMemoryStore;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = AuthService::new(Arc::new(InMemoryStore::new()));
///
/// auth.register("alice", "pw1").await?;
/// let session_user = auth.login("alice", "pw1").await?;
/// assert_eq!(session_user.role.as_str(), "user");
/// # Ok(())
/// # }
/// ```

use super::password::{self, PasswordError};
use super::session::SessionUser;
use crate::models::{CreateUser, Role, User};
use crate::store::{Store, StoreError};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// Username of the bootstrap administrator
pub const ADMIN_USERNAME: &str = "admin";

/// Fixed password of the bootstrap administrator
///
/// Known to anyone who reads this file. Rotate it right after the first login.
pub const ADMIN_DEFAULT_PASSWORD: &str = "admin";

/// Auth service error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Username or password was empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Registration conflict
    #[error("user already exists")]
    DuplicateUser,

    /// Unknown username or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Storage failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Registers and authenticates users
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
}

impl AuthService {
    /// Creates a service over the given store
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Registers a new account with role `user`
    ///
    /// # Errors
    ///
    /// - `MissingField` if username or password is empty
    /// - `DuplicateUser` if the username is taken (the existing row is untouched)
    /// - `Password` / `Store` for infrastructure failures
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if username.is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let password_hash = password::hash_password(password)?;

        let user = self
            .store
            .create_user(CreateUser {
                username: username.to_string(),
                password_hash,
                role: Role::User,
            })
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => AuthError::DuplicateUser,
                other => AuthError::Store(other),
            })?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks credentials and returns the identity to store in the session
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown username or a wrong password.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionUser, AuthError> {
        let Some(user) = self.store.find_user_by_username(username).await? else {
            burn_dummy_verification(password);
            debug!(username = %username, "Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(password, &user.password_hash)? {
            debug!(username = %username, "Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(SessionUser::from_user(&user))
    }

    /// Creates the `admin` account if it does not exist yet
    ///
    /// Returns `true` if the account was created by this call. An existing
    /// `admin` row is never modified.
    pub async fn bootstrap_admin(&self) -> Result<bool, AuthError> {
        let password_hash = password::hash_password(ADMIN_DEFAULT_PASSWORD)?;

        let created = self
            .store
            .create_user_if_absent(CreateUser {
                username: ADMIN_USERNAME.to_string(),
                password_hash,
                role: Role::Admin,
            })
            .await?;

        if created {
            warn!(
                username = ADMIN_USERNAME,
                "Bootstrap admin created with the default password; rotate it immediately"
            );
        } else {
            debug!(username = ADMIN_USERNAME, "Bootstrap admin already present");
        }

        Ok(created)
    }
}

/// Runs one verification against a fixed hash and discards the result
fn burn_dummy_verification(password: &str) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let hash = DUMMY_HASH.get_or_init(|| password::hash_password("cinelog-dummy-password").ok());
    if let Some(hash) = hash {
        let _ = password::verify_password(password, hash);
    }
}
