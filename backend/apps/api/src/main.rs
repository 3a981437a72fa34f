//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod spa;

use std::net::SocketAddr;
use std::time::Duration;

use auth::domain::repository::AuthSessionRepository;
use auth::{AuthAppState, PgAuthRepository, authenticate, users_router};
use axum::{
    Router,
    extract::State,
    http::{Method, header},
    routing::get,
};
use cards::{CardsAppState, CardsConfig, PgCardRepository, cards_router};
use kernel::error::app_error::{AppError, AppResult};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,cards=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_repo = PgAuthRepository::new(pool.clone());
    spawn_session_cleanup(auth_repo.clone());

    let auth_state = AuthAppState::new(auth_repo, config.auth_config()?);
    let cards_state = CardsAppState::new(PgCardRepository::new(pool.clone()), CardsConfig::default());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = Router::new()
        .nest("/api/users", users_router(auth_state.clone()))
        .nest("/api/cards", cards_router(cards_state));

    let mut app = authenticate(api, auth_state)
        .route("/api/routes", get(spa::routes_table))
        .route("/health", get(health))
        .route("/health/ready", get(readiness).with_state(pool));

    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "Serving frontend");
        app = app.fallback_service(spa::frontend_service(dir));
    }

    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Liveness check
async fn health() -> &'static str {
    "ok"
}

/// Readiness check; 503 while the database is unreachable
async fn readiness(State(pool): State<PgPool>) -> AppResult<&'static str> {
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| AppError::service_unavailable("Database unavailable").with_source(e))?;
    Ok("ok")
}

/// Drop expired sessions at startup and then hourly
fn spawn_session_cleanup(repo: PgAuthRepository) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            match repo.cleanup_expired().await {
                Ok(sessions) => {
                    tracing::info!(sessions_deleted = sessions, "Auth session cleanup completed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
                }
            }
        }
    });
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
