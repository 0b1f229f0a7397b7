//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads configuration, opens the database, runs migrations and
//! starts listening right away. The generation model is loaded by a background
//! task and installed into the shared [`ModelSlot`]; until then `/api/chat`
//! answers `503`.

// region: --- Imports
use crate::chat::{load_generator, GenerationConfig, ModelSlot};
use crate::handlers;
use crate::middleware::{
    attach_identity, log_requests, rate_limit, require_auth, stamp_req, RateLimiter, RequestStamp,
};
use axum::{
    extract::FromRef,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use lib_core::{create_pool, Config, DbPool};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub model: ModelSlot,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Builds the state, sizing the rate limiter from `config`.
    pub fn new(db: DbPool, config: Config, model: ModelSlot) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        ));
        Self {
            db,
            config,
            model,
            rate_limiter,
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for ModelSlot {
    fn from_ref(state: &AppState) -> Self {
        state.model.clone()
    }
}

impl FromRef<AppState> for Arc<RateLimiter> {
    fn from_ref(state: &AppState) -> Self {
        state.rate_limiter.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3001")
    pub bind_address: String,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
            migrations_path: "./migrations",
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Configure the global tracing subscriber from `LOG_LEVEL`.
fn init_tracing() -> anyhow::Result<String> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {e}"))?;

    Ok(log_level)
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
///
/// A generation model that fails to load is *not* a startup error; it is
/// logged and the chat endpoint keeps answering `503`.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_level = init_tracing()?;

    info!(" CHAT BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env()?;
    app_config.validate()?;
    let generation_config = GenerationConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    info!("Database URL: {}", app_config.database_url);

    // Ensure data directory exists for SQLite database
    if let Some(db_path) = app_config.database_url.strip_prefix("sqlite:") {
        let db_path = db_path.trim_start_matches("//");
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations from: {}", config.migrations_path);
    let migrator = sqlx::migrate::Migrator::new(std::path::Path::new(config.migrations_path)).await?;
    migrator.run(&pool).await?;
    info!(" Migrations complete");

    let model = ModelSlot::empty();
    spawn_model_loader(model.clone(), generation_config);

    let state = AppState::new(pool, app_config, model);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    // ConnectInfo feeds the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// Load the generator off the request path and install it into `slot`.
fn spawn_model_loader(slot: ModelSlot, generation_config: GenerationConfig) {
    tokio::spawn(async move {
        info!(
            provider = ?generation_config.provider,
            model = %generation_config.model,
            "[MODEL] Loading text generation client..."
        );
        match load_generator(&generation_config) {
            Ok(generator) => match slot.install(generator) {
                Ok(()) => info!(model = %generation_config.model, "[MODEL] Ready"),
                Err(e) => error!("[MODEL] Could not install generator: {}", e),
            },
            Err(e) => error!(
                "[MODEL] Failed to load generator: {}. /api/chat will answer 503.",
                e
            ),
        }
    });
}

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    let chat_routes = Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .route_layer(from_fn_with_state(state.clone(), attach_identity));

    let history_routes = Router::new()
        .route("/api/history", get(handlers::history::get_history))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .merge(chat_routes)
        .merge(history_routes)
        .route_layer(from_fn_with_state(state.rate_limiter.clone(), rate_limit));

    Router::new()
        .merge(api_routes)
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        request_id = %RequestStamp::id_of(request),
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        // Outermost after CORS so the id exists for the span and the logger
        .layer(from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" CHAT:");
    info!("   • POST /api/chat        {{\"message\": \"...\"}}");
    info!(" AUTH:");
    info!("   • POST /api/register");
    info!("   • POST /api/login");
    info!("   • GET  /api/history     (Bearer token)");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
