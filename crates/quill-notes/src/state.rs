//! Shared application state.

use std::sync::Arc;

use axum::extract::FromRef;

use quill_auth::AuthState;
use quill_core::NoteStorage;

/// Everything handlers need, injected at startup.
#[derive(Clone)]
pub struct AppState {
    /// Note store. In production this is the cache-aside decorator over
    /// `quill_postgres::PostgresNoteStorage`; tests swap in fakes.
    pub notes: Arc<dyn NoteStorage>,

    /// Token codec and cookie settings for session verification.
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
