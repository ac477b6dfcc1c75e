/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with
/// all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tasknest_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = tasknest_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::Key;
use sqlx::PgPool;
use std::sync::Arc;
use tasknest_shared::auth::session;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Cookie signing key, derived once from the configured secret
    session_key: Key,
}

impl AppState {
    /// Creates new application state
    ///
    /// # Panics
    ///
    /// Panics if the session secret is shorter than 32 bytes; config
    /// validation rejects such secrets before state is built.
    pub fn new(db: PgPool, config: Config) -> Self {
        let session_key = session::session_key(&config.session.secret);
        Self {
            db,
            config: Arc::new(config),
            session_key,
        }
    }
}

/// Lets `SignedCookieJar` pull its signing key straight from the state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                     # Liveness (public)
/// └── /api/v1                                     # Route map (public)
///     ├── POST /accounts                          # Register (public)
///     ├── POST /accounts/login                    # Login (public)
///     ├── GET  /accounts/logout                   # Logout
///     ├── GET/PUT/DELETE /accounts/:username      # Profile (owner only)
///     ├── GET/POST /accounts/:username/tasks      # Tasks (owner only)
///     └── GET/PUT/DELETE /accounts/:username/tasks/:id
/// ```
///
/// Authorization is enforced inside the handlers (the owner check needs
/// the `:username` path parameter), not as a router layer.
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (permissive, matching the Access-Control-Allow-Origin: *
///    behavior the API has always had)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/v1", get(routes::info::info))
        .route("/api/v1/accounts", post(routes::profiles::register))
        .route("/api/v1/accounts/login", post(routes::auth::login))
        .route("/api/v1/accounts/logout", get(routes::auth::logout))
        .route(
            "/api/v1/accounts/:username",
            get(routes::profiles::profile_detail)
                .put(routes::profiles::profile_update)
                .delete(routes::profiles::profile_delete),
        )
        .route(
            "/api/v1/accounts/:username/tasks",
            get(routes::tasks::task_list).post(routes::tasks::task_create),
        )
        .route(
            "/api/v1/accounts/:username/tasks/:id",
            get(routes::tasks::task_detail)
                .put(routes::tasks::task_update)
                .delete(routes::tasks::task_delete),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
