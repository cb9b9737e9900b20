/// Session derivation and the request interceptor chain
///
/// One middleware runs in front of every route:
///
/// 1. Reads the [`SessionUser`] from the cookie-backed session (if any).
/// 2. Runs every interceptor whose path predicate matches, in list order.
/// 3. Attaches the `SessionUser` to the request extensions and dispatches.
///
/// The chain is an explicit ordered list of `(PathPrefix, Interceptor)` pairs.
///
/// # Default chain
///
/// ```text
/// /api  ->  AccessLog
/// ```

use crate::{app::AppState, error::ApiError};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use cinelog_shared::auth::{SessionUser, SESSION_USER_KEY};
use tower_sessions::Session;
use tracing::warn;

/// Path predicate matching a prefix on segment boundaries
///
/// `/api` matches `/api` and `/api/movies` but not `/apiary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefix(&'static str);

impl PathPrefix {
    /// Creates a predicate for `prefix` (no trailing slash)
    pub const fn new(prefix: &'static str) -> Self {
        Self(prefix)
    }

    /// Whether `path` falls under this prefix
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.0) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Work done for a matching request before its handler runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interceptor {
    /// Record one access log entry for an authenticated session
    AccessLog,
}

impl Interceptor {
    fn run(&self, user: Option<&SessionUser>, state: &AppState) {
        match self {
            Interceptor::AccessLog => {
                if let Some(user) = user {
                    // Detached: the handler never waits for the insert.
                    drop(state.access_logger.record(user.user_id));
                }
            }
        }
    }
}

/// Ordered list of interceptors
#[derive(Debug, Clone)]
pub struct InterceptorChain {
    entries: Vec<(PathPrefix, Interceptor)>,
}

impl InterceptorChain {
    /// Creates a chain from explicit entries, evaluated in order
    pub fn new(entries: Vec<(PathPrefix, Interceptor)>) -> Self {
        Self { entries }
    }

    /// Interceptors that apply to `path`, in evaluation order
    pub fn matching<'a>(&'a self, path: &'a str) -> impl Iterator<Item = Interceptor> + 'a {
        self.entries
            .iter()
            .filter(move |(prefix, _)| prefix.matches(path))
            .map(|(_, interceptor)| *interceptor)
    }

    /// Runs every matching interceptor
    pub fn run(&self, path: &str, user: Option<&SessionUser>, state: &AppState) {
        for interceptor in self.matching(path) {
            interceptor.run(user, state);
        }
    }
}

impl Default for InterceptorChain {
    fn default() -> Self {
        Self::new(vec![(PathPrefix::new("/api"), Interceptor::AccessLog)])
    }
}

/// Middleware deriving the session identity and running the interceptor chain
///
/// A session that cannot be read is treated as anonymous.
pub async fn intercept_layer(
    State(state): State<AppState>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Response {
    let user = match session.get::<SessionUser>(SESSION_USER_KEY).await {
        Ok(user) => user,
        Err(e) => {
            warn!(error = %e, "Failed to load session; treating request as anonymous");
            None
        }
    };

    state.interceptors.run(req.uri().path(), user.as_ref(), &state);

    if let Some(user) = user {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}

/// Extractor for routes that require a logged-in user
///
/// Rejects with 403 when the request carries no authenticated session.
///
/// # Example
///
/// ```no_run
/// use cinelog_api::middleware::intercept::CurrentUser;
///
/// async fn handler(CurrentUser(user): CurrentUser) -> String {
///     format!("user {}", user.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .copied()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Forbidden("not authorized".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix_matches_segments() {
        let prefix = PathPrefix::new("/api");

        assert!(prefix.matches("/api"));
        assert!(prefix.matches("/api/"));
        assert!(prefix.matches("/api/movies"));
        assert!(prefix.matches("/api/movies/3"));
        assert!(!prefix.matches("/apiary"));
        assert!(!prefix.matches("/auth/login"));
        assert!(!prefix.matches("/"));
        assert!(!prefix.matches("/setup"));
    }

    #[test]
    fn test_default_chain_logs_only_api() {
        let chain = InterceptorChain::default();

        assert_eq!(
            chain.matching("/api/stats").collect::<Vec<_>>(),
            vec![Interceptor::AccessLog]
        );
        assert_eq!(chain.matching("/auth/login").count(), 0);
        assert_eq!(chain.matching("/index.html").count(), 0);
    }

    #[test]
    fn test_chain_preserves_order() {
        let chain = InterceptorChain::new(vec![
            (PathPrefix::new("/api"), Interceptor::AccessLog),
            (PathPrefix::new("/api/movies"), Interceptor::AccessLog),
        ]);

        assert_eq!(chain.matching("/api/movies").count(), 2);
        assert_eq!(chain.matching("/api/stats").count(), 1);
    }

    #[tokio::test]
    async fn test_current_user_rejects_anonymous() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();

        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_current_user_reads_extension() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        parts.extensions.insert(SessionUser {
            user_id: 5,
            role: cinelog_shared::models::Role::User,
        });

        let CurrentUser(user) = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user.user_id, 5);
    }
}
