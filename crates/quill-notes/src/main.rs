use std::{env, sync::Arc, time::Duration};

use quill_api::observability;
use quill_auth::AuthState;
use quill_cache::{CacheBackend, CachedNoteStorage, NotesCache};
use quill_notes::config::loader::load_config;
use quill_notes::{AppState, build_app, server};
use quill_postgres::{PostgresNoteStorage, create_pool, ensure_notes_schema};

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
        && let Err(e) = ensure_notes_schema(&pool).await
    {
        tracing::error!(error = %e, "Failed to prepare notes schema");
        std::process::exit(1);
    }

    // Redis is an optimization, never a dependency: a bad URL demotes the
    // service to an in-process cache instead of failing startup.
    let backend = match cfg.cache.redis_url.as_deref() {
        Some(url) => match CacheBackend::redis(url) {
            Ok(backend) => {
                tracing::info!("Redis cache enabled");
                backend
            }
            Err(e) => {
                tracing::warn!(error = %e, "Invalid Redis config, using in-process cache");
                CacheBackend::memory()
            }
        },
        None => {
            tracing::info!("No Redis URL configured, using in-process cache");
            CacheBackend::memory()
        }
    };
    let cache = NotesCache::new(backend, Duration::from_secs(cfg.cache.notes_ttl_secs));

    let state = AppState {
        notes: Arc::new(CachedNoteStorage::new(
            Arc::new(PostgresNoteStorage::new(pool)),
            cache,
        )),
        auth: AuthState::new(Arc::new(cfg.auth.codec()), cfg.auth.cookie.clone()),
    };

    let app = build_app(state);

    if let Err(e) = server::run(cfg.addr(), app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
