//! Session token issuance and verification shared by the Quill services.
//!
//! The token is the only channel of trust between the identity service and
//! the notes service — there is no shared session store. This crate holds
//! everything both sides must agree on:
//!
//! - [`password`]: Argon2id credential verifiers.
//! - [`claims`]: the single typed claims schema (`SessionClaims`).
//! - [`token`]: the HS256 codec binding claims to the shared secret.
//! - [`session`]: the transport convention (bearer header or cookie).
//! - [`middleware`]: the axum extractor that turns an incoming request
//!   into a verified [`CurrentUser`] or a 401.

pub mod claims;
pub mod config;
pub mod error;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;

pub use claims::SessionClaims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use middleware::{AuthState, CurrentUser, SessionAuth};
pub use session::CookieConfig;
pub use token::{TokenCodec, TokenError};
