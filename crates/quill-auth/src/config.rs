//! Authentication configuration shared by both services.

use std::time::Duration;

use serde::Deserialize;

use crate::session::CookieConfig;
use crate::token::TokenCodec;

fn default_token_ttl_secs() -> u64 {
    86_400
}

/// Token and cookie settings.
///
/// Both services must be configured with the same `jwt_secret`; it is the
/// only thing that lets the notes service trust tokens issued by the
/// identity service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret.
    pub jwt_secret: String,

    /// Token lifetime in seconds. Defaults to 24 hours.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    /// Session cookie settings.
    #[serde(default)]
    pub cookie: CookieConfig,
}

impl AuthConfig {
    /// Builds the token codec from this configuration.
    #[must_use]
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(&self.jwt_secret, Duration::from_secs(self.token_ttl_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let cfg: AuthConfig = serde_json::from_str(r#"{"jwt_secret": "s"}"#).unwrap();
        assert_eq!(cfg.token_ttl_secs, 86_400);
        assert_eq!(cfg.cookie.name, "token");
        assert!(!cfg.cookie.secure);
    }

    #[test]
    fn test_codec_ttl_matches_config() {
        let cfg: AuthConfig =
            serde_json::from_str(r#"{"jwt_secret": "s", "token_ttl_secs": 60}"#).unwrap();
        assert_eq!(cfg.codec().ttl(), Duration::from_secs(60));
    }
}
