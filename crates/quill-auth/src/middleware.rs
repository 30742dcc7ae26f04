//! Per-request access mediation.
//!
//! The [`SessionAuth`] extractor runs session-carrier extraction followed
//! by token verification and hands the handler a verified [`CurrentUser`].
//! Any failure — no token, malformed, expired, bad signature — collapses
//! into one `Unauthorized` response; the sub-reason is retained in logs
//! only. Ownership of resources is not checked here: handlers pass the
//! verified user id into the storage predicates.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::error::AuthError;
use crate::session::{self, CookieConfig};
use crate::token::TokenCodec;

/// State required by the [`SessionAuth`] extractor.
///
/// Include this in the application state and expose it via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    /// Codec bound to the shared signing secret.
    pub codec: Arc<TokenCodec>,

    /// Cookie settings for the session carrier.
    pub cookie: CookieConfig,
}

impl AuthState {
    /// Creates a new auth state.
    #[must_use]
    pub fn new(codec: Arc<TokenCodec>, cookie: CookieConfig) -> Self {
        Self { codec, cookie }
    }
}

/// The verified identity attached to a request.
///
/// A detached copy of the claims, valid only for this request; nothing
/// here is re-read from the identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Axum extractor producing a [`CurrentUser`] or a 401.
#[derive(Debug)]
pub struct SessionAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for SessionAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let Some(token) = session::extract_token(parts, &auth_state.cookie) else {
            tracing::debug!("No session token in request");
            return Err(AuthError::unauthorized("invalid or missing session"));
        };

        let claims = auth_state.codec.verify(&token).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            AuthError::unauthorized("invalid or missing session")
        })?;

        Ok(SessionAuth(CurrentUser {
            id: claims.id,
            username: claims.username,
            email: claims.email,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use std::time::Duration;

    fn auth_state() -> AuthState {
        AuthState::new(
            Arc::new(TokenCodec::new("test-secret", Duration::from_secs(3_600))),
            CookieConfig::default(),
        )
    }

    fn parts_with(headers: &[(&str, String)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_valid_bearer_token_accepted() {
        let state = auth_state();
        let token = state.codec.issue(42, "ada", "ada@example.com").unwrap();
        let mut parts = parts_with(&[("authorization", format!("Bearer {token}"))]);

        let SessionAuth(user) = SessionAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.username, "ada");
    }

    #[tokio::test]
    async fn test_valid_cookie_token_accepted() {
        let state = auth_state();
        let token = state.codec.issue(7, "bob", "bob@example.com").unwrap();
        let mut parts = parts_with(&[("cookie", format!("token={token}"))]);

        let SessionAuth(user) = SessionAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let state = auth_state();
        let mut parts = parts_with(&[]);

        let err = SessionAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_foreign_token_rejected_identically() {
        // Signed by a different secret: same outward rejection as absence.
        let other = TokenCodec::new("other-secret", Duration::from_secs(3_600));
        let token = other.issue(1, "eve", "eve@example.com").unwrap();

        let state = auth_state();
        let mut parts = parts_with(&[("authorization", format!("Bearer {token}"))]);

        let err = SessionAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized { .. }));
    }
}
