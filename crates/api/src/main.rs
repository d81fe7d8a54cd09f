use std::net::SocketAddr;
use std::sync::Arc;

use issuetracker_core::service::IssueService;
use issuetracker_core::store::IssueStore;
use issuetracker_db::{MemoryIssueStore, PgIssueStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use issuetracker_api::config::{LogFormat, ServerConfig};
use issuetracker_api::router::build_app_router;
use issuetracker_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = config.store_kind(),
        "Loaded server configuration"
    );

    // --- Record store ---
    let store: Arc<dyn IssueStore> = match &config.database_url {
        Some(database_url) => {
            let pool = issuetracker_db::create_pool(database_url, config.pool_settings())
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            issuetracker_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            issuetracker_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgIssueStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, issues are kept in memory only");
            Arc::new(MemoryIssueStore::new())
        }
    };

    // --- App state ---
    let state = AppState {
        issues: IssueService::new(store),
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

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber: env filter plus a pretty or JSON fmt layer.
fn init_tracing(format: LogFormat) {
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "issuetracker_api=debug,issuetracker_core=debug,tower_http=debug".into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
