//! Auto-service shop API server
//!
//! Reads configuration from TOML (~/.config/autoservice/config.toml or
//! `AUTOSERVICE_CONFIG`), prepares the SQLite database and serves the REST
//! API until SIGINT/SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use autoservice::config::{resolve_config_path, AppConfig, LogFormat};
use autoservice::infrastructure::crypto::PasswordHasher;
use autoservice::infrastructure::{init_database, initialize, ShutdownCoordinator};
use autoservice::session::{spawn_session_purger, InMemorySessionStore, SessionStore};
use autoservice::{create_api_router, AppState};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(600);

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = resolve_config_path();
    let (app_cfg, config_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_tracing(&app_cfg);

    match config_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    info!("Starting auto-service shop API...");

    // ── Database ───────────────────────────────────────────────
    let db = init_database(&app_cfg.database_config()).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        e
    })?;

    let hasher = PasswordHasher::new(app_cfg.security.bcrypt_cost);
    initialize(&db, &app_cfg.default_accounts(), &hasher)
        .await
        .map_err(|e| {
            error!("Failed to prepare database: {}", e);
            e
        })?;

    // ── Sessions ───────────────────────────────────────────────
    let sessions: Arc<dyn SessionStore> =
        Arc::new(InMemorySessionStore::new(app_cfg.session_ttl()));
    info!(
        ttl_hours = app_cfg.security.session_ttl_hours,
        "🔑 Session store ready"
    );

    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();
    shutdown.start_signal_listener();

    let purger = spawn_session_purger(
        sessions.clone(),
        SESSION_PURGE_INTERVAL,
        shutdown_signal.clone(),
    );

    // ── REST API ───────────────────────────────────────────────
    let state = AppState::new(db.clone(), sessions, hasher, app_cfg.reset_token_ttl());
    let api_router = create_api_router(state);

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let served = axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await;

    if let Err(e) = served {
        error!("REST API server error: {}", e);
    }
    // Stop background tasks even when the server exited on an error.
    shutdown_signal.trigger();

    // ── Cleanup ────────────────────────────────────────────────
    shutdown
        .finish(async move {
            if let Err(e) = purger.await {
                warn!("Session purger task failed: {}", e);
            }
            match db.close().await {
                Ok(()) => info!("✅ Database connection closed"),
                Err(e) => warn!("Error closing database connection: {}", e),
            }
        })
        .await;

    info!("👋 Auto-service shop API shutdown complete");
    Ok(())
}
