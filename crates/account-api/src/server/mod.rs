//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use account_cache::{MemorySessionStore, RedisPool, RedisSessionStore};
use account_common::{AppConfig, AppError, SessionBackend, StorageBackend};
use account_core::{AccessPolicy, SessionAuthority, UserRepository};
use account_db::{create_pool, run_migrations, MemoryUserRepository, PgUserRepository};
use account_service::{BootstrapService, ServiceContextBuilder};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.cors,
        &config.session.token_header,
        config.app.env.is_production(),
    );
    router.with_state(state)
}

/// Open the configured record store, applying the schema when it is
/// PostgreSQL
async fn create_user_repo(config: &AppConfig) -> Result<Arc<dyn UserRepository>, AppError> {
    match (config.storage.backend, &config.storage.database) {
        (StorageBackend::Postgres, Some(database)) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&account_db::DatabaseConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");
            Ok(Arc::new(PgUserRepository::new(pool)))
        }
        (StorageBackend::Postgres, None) => Err(AppError::Config(
            "STORAGE_BACKEND=postgres requires DATABASE_URL".to_string(),
        )),
        (StorageBackend::Memory, _) => {
            warn!("Using in-process record store; users are lost on restart");
            Ok(Arc::new(MemoryUserRepository::new()))
        }
    }
}

/// Open the configured session backend
fn create_sessions(config: &AppConfig) -> Result<Arc<dyn SessionAuthority>, AppError> {
    let ttl = config.session.timeout_seconds;
    match (config.session.backend, &config.session.redis) {
        (SessionBackend::Redis, Some(redis)) => {
            info!("Connecting to Redis...");
            let pool = RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            Ok(Arc::new(RedisSessionStore::new(pool, ttl)))
        }
        (SessionBackend::Redis, None) => Err(AppError::Config(
            "SESSION_BACKEND=redis requires REDIS_URL".to_string(),
        )),
        (SessionBackend::Memory, _) => {
            info!("Using in-process session store");
            Ok(Arc::new(MemorySessionStore::new(ttl)))
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let user_repo = create_user_repo(&config).await?;
    let sessions = create_sessions(&config)?;

    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .sessions(sessions)
        .access_policy(AccessPolicy::new(config.security.elevated_accounts.iter().cloned()))
        .credential_policy(config.security.credential_policy)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if config.security.seed_default_accounts {
        let created = BootstrapService::new(&service_context)
            .seed_defaults()
            .await
            .map_err(AppError::from)?;
        info!(created, "Default accounts seeded");
    }

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read listener address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
