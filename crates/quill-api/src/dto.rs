//! Request and response body shapes.

use serde::{Deserialize, Serialize};

use quill_core::Note;

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Success body of login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub message: String,
    pub user_id: i64,
    pub username: String,
}

/// Generic `{message}` body (logout, note update/delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a message body.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Body of note create and update requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NoteBody {
    pub title: String,
    pub content: String,
}

/// Success body of `POST /api/notes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteCreatedResponse {
    pub message: String,
    pub note_id: i64,
}

/// Body of `GET /api/notes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesResponse {
    pub notes: Vec<Note>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserializes() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username": "ada", "email": "ada@example.com", "password": "pw"}"#,
        )
        .unwrap();
        assert_eq!(req.username, "ada");
        assert_eq!(req.email, "ada@example.com");
    }

    #[test]
    fn test_session_response_shape() {
        let body = SessionResponse {
            message: "Login successful".to_string(),
            user_id: 42,
            username: "ada".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["user_id"], 42);
        assert_eq!(json["message"], "Login successful");
    }
}
