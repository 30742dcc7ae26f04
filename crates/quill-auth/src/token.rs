//! HS256 session token codec.
//!
//! Signs and verifies [`SessionClaims`] against a single shared symmetric
//! secret. Verification is fail-closed: an unexpected algorithm in the
//! token header is rejected the same way a bad signature is, never used
//! as a fallback.

use std::time::Duration;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use time::OffsetDateTime;

use crate::claims::SessionClaims;

/// Errors that can occur during token operations.
///
/// Callers reject the request identically for all verification failures;
/// the variants exist so diagnostics can tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to sign a token.
    #[error("Failed to sign token: {message}")]
    Signing {
        /// Description of the signing failure.
        message: String,
    },

    /// The signature does not verify against the shared secret, or the
    /// token claims a different signing algorithm.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The token's `exp` is in the past.
    #[error("Token expired")]
    Expired,

    /// The token structure or claim fields do not match the schema.
    #[error("Malformed claims: {message}")]
    MalformedClaims {
        /// Description of what failed to decode.
        message: String,
    },
}

impl TokenError {
    /// Creates a new `Signing` error.
    #[must_use]
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Creates a new `MalformedClaims` error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedClaims {
            message: message.into(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            // Algorithm confusion folds into the signature failure class:
            // a token claiming anything but HS256 cannot have been signed
            // by the holder of our secret.
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => Self::InvalidSignature,
            _ => Self::malformed(err.to_string()),
        }
    }
}

/// Codec for issuing and verifying session tokens.
///
/// Thread-safe; one instance is constructed at startup from the shared
/// secret and injected wherever tokens are handled.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Creates a codec from the shared secret and token lifetime.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Returns the configured token lifetime.
    ///
    /// The session cookie's max-age is derived from this so the cookie
    /// and the embedded `exp` stay in sync.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a signed token for the given identity subset.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if signing fails.
    pub fn issue(&self, id: i64, username: &str, email: &str) -> Result<String, TokenError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = SessionClaims {
            id,
            username: username.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::signing(e.to_string()))
    }

    /// Verifies a token and decodes its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidSignature`] on a signature or
    /// algorithm mismatch, [`TokenError::Expired`] when `exp` has passed,
    /// and [`TokenError::MalformedClaims`] for anything that fails the
    /// claims schema.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        // No clock-skew allowance: a token is valid iff now < exp.
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret", Duration::from_secs(86_400))
    }

    #[test]
    fn test_issue_then_verify() {
        let codec = codec();
        let token = codec.issue(42, "ada", "ada@example.com").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Even a few seconds past exp must be rejected; there is no
        // leeway window.
        let codec = TokenCodec::new("test-secret", Duration::from_secs(0));
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = SessionClaims {
            id: 1,
            username: "a".to_string(),
            email: "a@b.c".to_string(),
            iat: now - 3_600,
            exp: now - 5,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(codec.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = codec().issue(1, "a", "a@b.c").unwrap();
        let other = TokenCodec::new("different-secret", Duration::from_secs(60));
        assert!(matches!(
            other.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let codec = codec();
        let token = codec.issue(1, "a", "a@b.c").unwrap();

        // Flip the last signature character to a different base64url char.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            codec.verify(&tampered),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_unexpected_algorithm_rejected() {
        // Signed with the right secret but HS384: must be an error, never
        // a fallback.
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = SessionClaims {
            id: 1,
            username: "a".to_string(),
            email: "a@b.c".to_string(),
            iat: now,
            exp: now + 3_600,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            codec().verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_fractional_id_rejected() {
        // A properly signed token whose id claim is not integral must be
        // classified as malformed, not truncated.
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = serde_json::json!({
            "id": 1.5,
            "username": "a",
            "email": "a@b.c",
            "iat": now,
            "exp": now + 3_600,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            codec().verify(&token),
            Err(TokenError::MalformedClaims { .. })
        ));
    }

    #[test]
    fn test_garbage_token_malformed() {
        assert!(matches!(
            codec().verify("not.a.jwt"),
            Err(TokenError::MalformedClaims { .. })
        ));
    }
}
