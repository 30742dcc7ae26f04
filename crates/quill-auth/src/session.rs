//! Session transport: how a token travels between client and service.
//!
//! Extraction consults exactly one transport per request: the
//! `Authorization: Bearer` header when present and well-formed, otherwise
//! the session cookie. The two are never merged — a deliberate, documented
//! precedence rather than a fallback chain that could mix identities.

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    request::Parts,
};
use cookie::{Cookie, SameSite};
use serde::Deserialize;

/// Cookie settings shared by issuance and extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    /// Cookie name. The bearer header and this cookie carry the same
    /// token format.
    #[serde(default = "default_cookie_name")]
    pub name: String,

    /// Whether to set the `Secure` attribute (enable behind TLS).
    #[serde(default)]
    pub secure: bool,
}

fn default_cookie_name() -> String {
    "token".to_string()
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            secure: false,
        }
    }
}

/// Extracts a session token from request parts.
///
/// Returns `None` for an anonymous request. A well-formed bearer header
/// wins outright; the cookie is only consulted when no usable header is
/// present.
#[must_use]
pub fn extract_token(parts: &Parts, config: &CookieConfig) -> Option<String> {
    if let Some(header) = parts.headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())
        && let Some(token) = header.strip_prefix("Bearer ").filter(|t| !t.is_empty())
    {
        return Some(token.to_string());
    }

    extract_token_from_cookie(parts, &config.name)
}

/// Parses the Cookie header and looks for the configured cookie name.
fn extract_token_from_cookie(parts: &Parts, cookie_name: &str) -> Option<String> {
    let cookie_header = parts.headers.get(COOKIE)?.to_str().ok()?;

    for pair in cookie_header.split(';') {
        let pair = pair.trim();
        if let Some((name, value)) = pair.split_once('=')
            && name.trim() == cookie_name
        {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Builds the session cookie set after login or registration.
///
/// `max_age_secs` must match the token's own TTL so the cookie and the
/// embedded `exp` expire together.
#[must_use]
pub fn session_cookie(token: &str, config: &CookieConfig, max_age_secs: u64) -> Cookie<'static> {
    Cookie::build((config.name.clone(), token.to_string()))
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs as i64))
        .build()
}

/// Builds the immediately-expiring replacement cookie used by logout.
///
/// This only instructs the client to discard its copy; a token already
/// distributed through the bearer channel stays valid until `exp`.
#[must_use]
pub fn expired_session_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((config.name.clone(), String::new()))
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}
