//! Quill notes service.
//!
//! Stores notes scoped to the user id carried in a verified session
//! token. Never calls the identity service; trust arrives inside the
//! token. List reads go through a cache-aside Redis layer, writes
//! invalidate it.

pub mod config;
pub mod handlers;
pub mod server;
pub mod state;

pub use config::AppConfig;
pub use server::build_app;
pub use state::AppState;
