/// Session values
///
/// The session store keeps one [`SessionUser`] under [`SESSION_USER_KEY`]
/// for an authenticated client. A request without that key is anonymous.
///
/// ```text
/// Anonymous --login--> Authenticated --logout / expiry--> Anonymous
/// ```

use crate::models::{Role, User};
use serde::{Deserialize, Serialize};

/// Key under which the authenticated user is stored in the session
pub const SESSION_USER_KEY: &str = "user";

/// Identity attached to an authenticated session
///
/// Derived from the session once per request and attached to the request
/// extensions; it is never mutated while the request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// ID of the logged-in user
    pub user_id: i64,

    /// Role at login time
    pub role: Role,
}

impl SessionUser {
    /// Builds the session value for a user who just authenticated
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
        }
    }
}
