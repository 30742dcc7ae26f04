use std::{env, sync::Arc};

use quill_api::observability;
use quill_auth::AuthState;
use quill_identity::config::loader::load_config;
use quill_identity::{AppState, build_app, server};
use quill_postgres::{PostgresUserStorage, create_pool, ensure_users_schema};

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else).
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    observability::init_tracing();

    let config_path = env::var("QUILL_CONFIG").ok();
    let cfg = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    observability::apply_logging_level(&cfg.logging.level);

    let pool = match create_pool(&cfg.postgres).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            std::process::exit(1);
        }
    };

    if cfg.postgres.run_migrations
        && let Err(e) = ensure_users_schema(&pool).await
    {
        tracing::error!(error = %e, "Failed to prepare users schema");
        std::process::exit(1);
    }

    let state = AppState {
        users: Arc::new(PostgresUserStorage::new(pool)),
        auth: AuthState::new(Arc::new(cfg.auth.codec()), cfg.auth.cookie.clone()),
    };

    let app = build_app(state);

    if let Err(e) = server::run(cfg.addr(), app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
