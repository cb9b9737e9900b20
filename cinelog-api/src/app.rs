/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Sessions
///
/// Sessions live in a process-local `tower_sessions::MemoryStore`. It drops
/// an entry on logout and treats an expired one as absent, but never purges
/// expired entries, so they stay in memory until restart. This is accepted
/// for a single-process deployment; a multi-process one needs a shared store.
///
/// # Example
///
/// ```no_run
/// use cinelog_api::{app::AppState, config::Config};
/// use cinelog_shared::store::{PgStore, Store};
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));
/// let state = AppState::new(store, config);
/// let app = cinelog_api::app::build_router(state)?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{
        intercept::{intercept_layer, InterceptorChain},
        security::SecurityHeadersLayer,
    },
};
use axum::{
    routing::{delete, get, post},
    Router,
};
use cinelog_shared::{access_logger::AccessLogger, auth::AuthService, store::Store};
use std::sync::Arc;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tower_sessions::{
    cookie::{Key, SameSite},
    Expiry, MemoryStore, SessionManagerLayer,
};
use tracing::Level;

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "cinelog.sid";

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub store: Arc<dyn Store>,

    /// Registration and login
    pub auth: AuthService,

    /// Fire-and-forget access log writer
    pub access_logger: AccessLogger,

    /// Interceptors run before every handler
    pub interceptors: Arc<InterceptorChain>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state with the default interceptor chain
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self::with_interceptors(store, config, InterceptorChain::default())
    }

    /// Creates new application state with an explicit interceptor chain
    pub fn with_interceptors(
        store: Arc<dyn Store>,
        config: Config,
        interceptors: InterceptorChain,
    ) -> Self {
        Self {
            auth: AuthService::new(store.clone()),
            access_logger: AccessLogger::new(store.clone()),
            store,
            interceptors: Arc::new(interceptors),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// ├── /setup                    # Admin bootstrap (public)
/// ├── /auth/                    # Session endpoints
/// │   ├── POST /register
/// │   ├── POST /login
/// │   └── POST /logout
/// ├── /api/                     # Access-logged when a session is present
/// │   ├── GET    /movies
/// │   ├── POST   /movies
/// │   ├── DELETE /movies/:id
/// │   ├── GET    /my-movies     # Session required
/// │   ├── POST   /my-movies     # Session required
/// │   └── GET    /stats
/// └── *                         # Static files from the public directory
/// ```
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. Security headers
/// 2. Logging (tower-http TraceLayer)
/// 3. Session cookie handling (tower-sessions)
/// 4. Session identity + interceptor chain
///
/// # Errors
///
/// Fails if the session secret cannot be turned into a signing key.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    use crate::routes;

    let key = Key::try_from(state.config.session.secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("SESSION_SECRET cannot be used as a signing key: {:?}", e))?;

    // In-memory store, signed cookie, inactivity expiry. Expired entries are not purged.
    let session = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(state.config.api.production)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            state.config.session.inactivity_seconds,
        )))
        .with_signed(key);

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout));

    let api_routes = Router::new()
        .route(
            "/movies",
            get(routes::movies::list_movies).post(routes::movies::create_movie),
        )
        .route("/movies/:id", delete(routes::movies::delete_movie))
        .route(
            "/my-movies",
            get(routes::dashboard::list_favorites).post(routes::dashboard::add_favorite),
        )
        .route("/stats", get(routes::dashboard::stats));

    let static_files = ServeDir::new(&state.config.api.public_dir);

    Ok(Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/setup", get(routes::setup::setup))
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .fallback_service(static_files)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            intercept_layer,
        ))
        .layer(session)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state))
}
