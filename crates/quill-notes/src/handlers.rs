//! Route handlers for the notes service.
//!
//! Every note route requires a verified session; the owner id used in
//! storage predicates always comes from the token, never from the
//! request body or path.

use axum::{
    Json,
    extract::{Path, State},
};

use quill_api::{ApiError, ApiResult, MessageResponse, NoteBody, NoteCreatedResponse, NotesResponse};
use quill_auth::SessionAuth;
use quill_core::NewNote;

use crate::state::AppState;

/// `GET /health`. Liveness only; Postgres and Redis are not probed.
pub async fn health() -> &'static str {
    "OK"
}

/// `POST /api/notes`.
pub async fn create_note(
    SessionAuth(user): SessionAuth,
    State(state): State<AppState>,
    Json(body): Json<NoteBody>,
) -> ApiResult<Json<NoteCreatedResponse>> {
    let title = body.title.trim();
    if title.is_empty() || body.content.is_empty() {
        return Err(ApiError::validation("title and content are required"));
    }

    let note_id = state
        .notes
        .create_note(&NewNote {
            title: title.to_string(),
            content: body.content,
            user_id: user.id,
        })
        .await?;

    tracing::info!(note_id, user_id = user.id, "Note created");

    Ok(Json(NoteCreatedResponse {
        message: "Note created successfully".to_string(),
        note_id,
    }))
}

/// `GET /api/notes`. Newest first; an owner with no notes gets an empty
/// list, not a 404.
pub async fn list_notes(
    SessionAuth(user): SessionAuth,
    State(state): State<AppState>,
) -> ApiResult<Json<NotesResponse>> {
    let notes = state.notes.list_notes(user.id).await?;
    Ok(Json(NotesResponse { notes }))
}

/// `PUT /api/notes/{id}`.
///
/// A note that does not exist and a note owned by someone else produce
/// the same 404.
pub async fn update_note(
    SessionAuth(user): SessionAuth,
    State(state): State<AppState>,
    Path(note_id): Path<i64>,
    Json(body): Json<NoteBody>,
) -> ApiResult<Json<MessageResponse>> {
    let title = body.title.trim();
    if title.is_empty() || body.content.is_empty() {
        return Err(ApiError::validation("title and content are required"));
    }

    state
        .notes
        .update_note(note_id, user.id, title, &body.content)
        .await?;

    tracing::info!(note_id, user_id = user.id, "Note updated");

    Ok(Json(MessageResponse::new("Note updated successfully")))
}

/// `DELETE /api/notes/{id}`. Same 404 folding as update.
pub async fn delete_note(
    SessionAuth(user): SessionAuth,
    State(state): State<AppState>,
    Path(note_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.notes.delete_note(note_id, user.id).await?;

    tracing::info!(note_id, user_id = user.id, "Note deleted");

    Ok(Json(MessageResponse::new("Note deleted successfully")))
}
