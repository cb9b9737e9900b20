/// Admin bootstrap endpoint
///
/// ```text
/// GET /setup
/// ```
///
/// Creates the `admin` account with the default password if it is missing.
/// Safe to call repeatedly: an existing admin row is left untouched.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, response::Html};
use cinelog_shared::auth::service::{ADMIN_DEFAULT_PASSWORD, ADMIN_USERNAME};

/// Bootstraps the admin account and answers with a short HTML confirmation
pub async fn setup(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let created = state.auth.bootstrap_admin().await?;

    let status = if created { "created" } else { "already present" };

    Ok(Html(format!(
        "Admin {status} (user: {ADMIN_USERNAME} / password: {ADMIN_DEFAULT_PASSWORD}). \
         Change this password now. <a href=\"/\">Back</a>"
    )))
}
