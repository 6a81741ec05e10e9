//! Praxis server — practice notification service.
//!
//! Entry point that wires persistence, the real-time channel and the
//! reminder scheduler together and serves the WebSocket endpoint.

use std::sync::Arc;

use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use praxis_core::config::AppConfig;
use praxis_core::error::AppError;
use praxis_database::DatabasePool;
use praxis_database::repositories::{
    AppointmentRepository, ClientRepository, NotificationRepository,
};
use praxis_notify::dispatcher::NotificationDispatcher;
use praxis_notify::service::NotificationService;
use praxis_realtime::authenticator::WsAuthenticator;
use praxis_realtime::registry::ConnectionRegistry;
use praxis_realtime::socket::RealtimeState;
use praxis_worker::scheduler::ReminderScheduler;
use praxis_worker::tasks::ReminderTasks;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration for the selected environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PRAXIS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Praxis v{}", env!("CARGO_PKG_VERSION"));

    // Database connection + migrations
    let db = DatabasePool::connect(&config.database).await?;
    praxis_database::migration::run_migrations(db.pool()).await?;

    // Repositories
    let notification_repo = Arc::new(NotificationRepository::new(db.pool().clone()));
    let appointment_repo = Arc::new(AppointmentRepository::new(db.pool().clone()));
    let client_repo = Arc::new(ClientRepository::new(db.pool().clone()));

    // Real-time channel
    let registry = Arc::new(ConnectionRegistry::new(
        config.realtime.channel_buffer_size,
    ));
    let authenticator = Arc::new(WsAuthenticator::new(&config.auth));

    // Notification core
    let notification_service = NotificationService::new(notification_repo);
    let dispatcher = Arc::new(NotificationDispatcher::new(
        notification_service,
        Arc::clone(&registry),
        config.notifications.clone(),
    ));

    // Reminder triggers
    let tasks = Arc::new(ReminderTasks::new(
        Arc::clone(&dispatcher),
        appointment_repo,
        client_repo,
        config.reminders.clone(),
    ));
    let scheduler = ReminderScheduler::new(tasks, config.reminders.clone()).await?;
    scheduler.register_all().await?;
    scheduler.start().await?;

    // HTTP server
    let realtime_state = RealtimeState {
        registry: Arc::clone(&registry),
        authenticator,
        config: config.realtime.clone(),
    };

    let health_db = db.clone();
    let app = axum::Router::new()
        .route(
            "/api/health",
            get(move || {
                let db = health_db.clone();
                async move {
                    let healthy = db.health_check().await.unwrap_or(false);
                    let status = if healthy { "ok" } else { "degraded" };
                    axum::Json(serde_json::json!({ "status": status }))
                }
            }),
        )
        .merge(praxis_realtime::socket::router(realtime_state))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Praxis server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    scheduler.stop().await?;
    registry.close_all();
    db.close().await;

    tracing::info!("Praxis server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
