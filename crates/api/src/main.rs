use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use survey_api::config::{DatabaseConfig, ServerConfig};
use survey_api::router::build_app_router;
use survey_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "survey_api=debug,survey_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let db_config = DatabaseConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        db_endpoints = db_config.urls.len(),
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = survey_db::connect_with_fallback(&db_config.urls, db_config.max_connections)
        .await
        .expect("Failed to connect to any database endpoint");
    tracing::info!("Database connection pool created");

    survey_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    survey_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Router ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let drain_started = Arc::new(Notify::new());
    let server = axum::serve(listener, app).with_graceful_shutdown({
        let drain_started = Arc::clone(&drain_started);
        async move {
            shutdown_signal().await;
            drain_started.notify_one();
        }
    });

    let drain_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    tokio::select! {
        result = server.into_future() => result.expect("Server error"),
        () = async {
            drain_started.notified().await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            tracing::warn!(
                timeout_secs = config.shutdown_timeout_secs,
                "In-flight requests did not drain in time, forcing shutdown"
            );
        }
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
