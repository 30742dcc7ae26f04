//! The session token claims schema.
//!
//! Both services decode tokens through this one type. Typed serde
//! decoding replaces the original design's per-call coercion: a claim of
//! the wrong shape fails decoding outright instead of being coerced
//! differently at each call site.

use serde::{Deserialize, Serialize};

/// Decoded payload of a session token.
///
/// A detached, time-bounded copy of the identity — not a live reference.
/// `id` must be an integral number: fractional values are a decode error,
/// never truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The authenticated user's id.
    pub id: i64,

    /// Username at issuance time.
    pub username: String,

    /// Email at issuance time.
    pub email: String,

    /// Issued at (unix seconds).
    pub iat: i64,

    /// Expiration (unix seconds). A token is valid iff the signature
    /// verifies and `now < exp`.
    pub exp: i64,
}
