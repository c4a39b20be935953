//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use chat_cache::TokenStore;
use chat_common::{AppConfig, AppError, AppResult};
use chat_core::{MessageRepository, UserRepository};
use chat_db::{
    create_pool, run_migrations, MemoryMessageRepository, MemoryUserRepository,
    PgMessageRepository, PgUserRepository, PoolConfig, MIGRATIONS_DIR,
};
use chat_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState.
///
/// Uses PostgreSQL when `DATABASE_URL` is configured, otherwise the
/// in-memory repositories. Also starts the token sweeper.
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let (user_repo, message_repo): (Arc<dyn UserRepository>, Arc<dyn MessageRepository>) =
        match &config.database {
            Some(database) => {
                info!("Connecting to PostgreSQL...");
                let pool = create_pool(&PoolConfig::from(database))
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                info!("PostgreSQL connection established");

                run_migrations(&pool, MIGRATIONS_DIR)
                    .await
                    .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
                info!("Database migrations applied");

                (
                    Arc::new(PgUserRepository::new(pool.clone())),
                    Arc::new(PgMessageRepository::new(pool)),
                )
            }
            None => {
                warn!("DATABASE_URL not set, using in-memory storage");
                (
                    Arc::new(MemoryUserRepository::new()),
                    Arc::new(MemoryMessageRepository::new()),
                )
            }
        };

    let token_store = TokenStore::new_shared(config.tokens.ttl());
    token_store.spawn_sweeper(config.tokens.sweep_interval());

    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .message_repo(message_repo)
        .token_store(token_store)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on an already bound listener until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> AppResult<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    info!(%addr, "Starting HTTP server");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");

    serve(listener, app, shutdown_signal()).await?;

    warn!("Server shutting down");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address: {e}")))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
