/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: The identity value kept in the cookie-backed session
/// - [`service`]: Registration, login and the admin bootstrap
///
/// # Example
///
/// ```no_run
/// use cinelog_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod service;
pub mod session;

pub use service::{AuthError, AuthService};
pub use session::{SessionUser, SESSION_USER_KEY};
