//! Shared application state.

use std::sync::Arc;

use axum::extract::FromRef;

use quill_auth::AuthState;
use quill_core::UserStorage;

/// Everything handlers need, injected at startup.
#[derive(Clone)]
pub struct AppState {
    /// User store. The authoritative implementation is
    /// `quill_postgres::PostgresUserStorage`; tests swap in fakes.
    pub users: Arc<dyn UserStorage>,

    /// Token codec and cookie settings.
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
