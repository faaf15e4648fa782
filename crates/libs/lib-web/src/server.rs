//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads and validates [`Config`], opens the SQLite pool, runs
//! migrations, picks the SMS sender and serves [`create_router`].

// region: --- Imports
use axum::{
    extract::FromRef,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use lib_core::{create_pool, run_migrations, Config, DbPool};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
use crate::services::sms::{LogSmsSender, SmsRuSender, SmsSender};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub sms: Arc<dyn SmsSender>,
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

impl FromRef<AppState> for Arc<dyn SmsSender> {
    fn from_ref(state: &AppState) -> Self {
        state.sms.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup

/// Install the global tracing subscriber, filtered by `LOG_LEVEL` (default `info`).
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

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Choose the SMS sender: sms.ru when an API id is configured, log-only otherwise.
pub fn sms_sender_from_config(config: &Config) -> anyhow::Result<Arc<dyn SmsSender>> {
    match &config.smsru_api_id {
        Some(api_id) => {
            info!("SMS provider: sms.ru");
            Ok(Arc::new(SmsRuSender::new(api_id.clone())?))
        }
        None => {
            info!("SMS provider: log only (SMSRU_API_ID not set)");
            Ok(Arc::new(LogSmsSender))
        }
    }
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_sqlite_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(db_path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let db_path = db_path.trim_start_matches("//");
    let db_path = db_path.split('?').next().unwrap_or(db_path);
    if db_path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }
    Ok(())
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection or migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = init_tracing()?;
    info!(" SALES ROBOT BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    info!("Database URL: {}", app_config.database_url);
    ensure_sqlite_dir(&app_config.database_url)?;

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations");
    run_migrations(&pool).await?;
    info!(" Migrations complete");

    let sms = sms_sender_from_config(&app_config)?;
    let bind_address = app_config.bind_address.clone();

    let state = AppState {
        db: pool,
        config: app_config,
        sms,
    };

    let app = create_router(state, config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(" SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    use axum::http::{HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::HeaderName::from_static("x-request-id"),
        ]);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    let protected = Router::new()
        .route("/api/profile", get(handlers::auth::profile))
        .route("/api/payments/activate", post(handlers::dashboard::activate_service))
        .route_layer(from_fn_with_state(state.config.clone(), require_auth));

    Router::new()
        .route("/register/request_code", post(handlers::auth::request_code))
        .route("/register/verify_code", post(handlers::auth::verify_code))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/api/test-call", post(handlers::dashboard::test_call))
        .route("/api/process-knowledge", post(handlers::dashboard::process_knowledge))
        .route("/api/tariffs", get(handlers::dashboard::tariffs))
        .route("/health", get(|| async { "OK" }))
        .merge(protected)
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri().path(),
                    )
                })
                .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::error!(
                        error = ?error,
                        latency_ms = latency.as_millis(),
                        "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                        error,
                        latency.as_millis()
                    );
                })
        )
        // Stamp before tracing and logging so both see the request ID
        .layer(from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" REGISTRATION:");
    info!("   • POST /register/request_code");
    info!("   • POST /register/verify_code");
    info!("   • POST /register");
    info!(" AUTH:");
    info!("   • POST /login");
    info!("   • GET  /api/profile (bearer)");
    info!(" DASHBOARD:");
    info!("   • POST /api/test-call");
    info!("   • POST /api/process-knowledge");
    info!("   • GET  /api/tariffs");
    info!("   • POST /api/payments/activate (bearer)");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_sqlite_dir_skips_memory() {
        assert!(ensure_sqlite_dir("sqlite::memory:").is_ok());
        assert!(ensure_sqlite_dir("postgres://localhost/db").is_ok());
    }

    #[test]
    fn test_ensure_sqlite_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("salesbot.db");

        ensure_sqlite_dir(&format!("sqlite:{}", db.display())).unwrap();

        assert!(dir.path().join("nested").is_dir());
    }
}
