//! Shared HTTP surface for the Quill services.
//!
//! Holds the error taxonomy every handler returns ([`ApiError`]), the
//! request/response body shapes, and the tracing bootstrap, so the two
//! services agree on the wire format without duplicating it.

pub mod dto;
pub mod error;
pub mod observability;

pub use dto::{
    LoginRequest, MeResponse, MessageResponse, NoteBody, NoteCreatedResponse, NotesResponse,
    RegisterRequest, SessionResponse,
};
pub use error::{ApiError, ApiResult};
