//! Notes service configuration.

use serde::Deserialize;

use quill_auth::AuthConfig;
use quill_postgres::PostgresConfig;

/// Top-level configuration, loaded from a TOML file plus `QUILL__`
/// environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub postgres: PostgresConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    /// Must carry the same `jwt_secret` as the identity service; it is
    /// the only thing that makes its tokens trustworthy here.
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.auth.jwt_secret.is_empty() {
            return Err("auth.jwt_secret must not be empty".into());
        }
        if self.cache.notes_ttl_secs == 0 {
            return Err("cache.notes_ttl_secs must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    /// Socket address the service binds to.
    pub fn addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .unwrap_or_else(|_| ([0, 0, 0, 0], self.server.port).into())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Cache-aside settings for note list reads.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Redis connection URL, e.g. `redis://localhost:6379`. When unset
    /// the service falls back to an in-process cache.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Lifetime of a cached note list in seconds.
    #[serde(default = "default_notes_ttl_secs")]
    pub notes_ttl_secs: u64,
}

fn default_notes_ttl_secs() -> u64 {
    120
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            redis_url: None,
            notes_ttl_secs: default_notes_ttl_secs(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    /// Loads configuration from an optional TOML file and `QUILL__`
    /// environment overrides, e.g. `QUILL__CACHE__REDIS_URL=redis://...`.
    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        let pathbuf = PathBuf::from(path.unwrap_or("quill-notes.toml"));
        if pathbuf.exists() {
            builder = builder.add_source(File::from(pathbuf));
        }
        builder = builder.add_source(
            Environment::with_prefix("QUILL")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(json: serde_json::Value) -> AppConfig {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = config_with(serde_json::json!({ "auth": { "jwt_secret": "s" } }));
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.cache.notes_ttl_secs, 120);
        assert!(cfg.cache.redis_url.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let cfg = config_with(serde_json::json!({
            "auth": { "jwt_secret": "s" },
            "cache": { "notes_ttl_secs": 0 }
        }));
        assert!(cfg.validate().is_err());
    }
}
