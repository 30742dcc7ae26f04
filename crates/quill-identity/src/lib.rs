//! Quill identity service.
//!
//! Owns the `users` table and is the only issuer of session tokens. The
//! notes service never calls back here; trust travels entirely inside the
//! signed token.

pub mod config;
pub mod handlers;
pub mod server;
pub mod state;

pub use config::AppConfig;
pub use server::build_app;
pub use state::AppState;
