//! End-to-end handler tests over an in-memory note store wrapped in the
//! real cache-aside decorator.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use time::OffsetDateTime;
use tower::ServiceExt;

use quill_auth::{AuthState, CookieConfig, TokenCodec};
use quill_cache::{CacheBackend, CachedNoteStorage, NotesCache};
use quill_core::{NewNote, Note, NoteStorage, StorageError, StorageResult};
use quill_notes::{AppState, build_app};

#[derive(Default)]
struct MemoryNoteStore {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicI64,
}

#[async_trait]
impl NoteStorage for MemoryNoteStore {
    async fn create_note(&self, note: &NewNote) -> StorageResult<i64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = OffsetDateTime::now_utc().replace_nanosecond(0).unwrap();
        self.notes.lock().unwrap().push(Note {
            id,
            title: note.title.clone(),
            content: note.content.clone(),
            user_id: note.user_id,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn list_notes(&self, owner_id: i64) -> StorageResult<Vec<Note>> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_note(
        &self,
        note_id: i64,
        owner_id: i64,
        title: &str,
        content: &str,
    ) -> StorageResult<()> {
        let mut notes = self.notes.lock().unwrap();
        match notes
            .iter_mut()
            .find(|n| n.id == note_id && n.user_id == owner_id)
        {
            Some(note) => {
                note.title = title.to_string();
                note.content = content.to_string();
                Ok(())
            }
            None => Err(StorageError::NotFoundOrForbidden),
        }
    }

    async fn delete_note(&self, note_id: i64, owner_id: i64) -> StorageResult<()> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| !(n.id == note_id && n.user_id == owner_id));
        if notes.len() == before {
            return Err(StorageError::NotFoundOrForbidden);
        }
        Ok(())
    }
}

struct TestService {
    app: Router,
    codec: Arc<TokenCodec>,
}

impl TestService {
    fn new() -> Self {
        let codec = Arc::new(TokenCodec::new("test-secret", Duration::from_secs(3_600)));
        let cache = NotesCache::new(CacheBackend::memory(), Duration::from_secs(120));
        let state = AppState {
            notes: Arc::new(CachedNoteStorage::new(
                Arc::new(MemoryNoteStore::default()),
                cache,
            )),
            auth: AuthState::new(Arc::clone(&codec), CookieConfig::default()),
        };
        Self {
            app: build_app(state),
            codec,
        }
    }

    fn token_for(&self, id: i64, username: &str) -> String {
        self.codec
            .issue(id, username, &format!("{username}@example.com"))
            .unwrap()
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.app.clone().oneshot(request).await.unwrap()
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const NOTE: &str = r#"{"title": "groceries", "content": "milk, eggs"}"#;

#[tokio::test]
async fn test_health_is_ok() {
    let svc = TestService::new();
    let response = svc.request("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_note_routes_require_a_session() {
    let svc = TestService::new();
    let response = svc.request("GET", "/api/notes", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = svc.request("POST", "/api/notes", None, Some(NOTE)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_notes() {
    let svc = TestService::new();
    let token = svc.token_for(1, "ada");

    let created = svc
        .request("POST", "/api/notes", Some(&token), Some(NOTE))
        .await;
    assert_eq!(created.status(), StatusCode::OK);
    let json = body_json(created).await;
    assert_eq!(json["message"], "Note created successfully");
    assert_eq!(json["note_id"], 1);

    let listed = svc.request("GET", "/api/notes", Some(&token), None).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let json = body_json(listed).await;
    assert_eq!(json["notes"].as_array().unwrap().len(), 1);
    assert_eq!(json["notes"][0]["title"], "groceries");
}

#[tokio::test]
async fn test_create_rejects_missing_title() {
    let svc = TestService::new();
    let token = svc.token_for(1, "ada");
    let response = svc
        .request(
            "POST",
            "/api/notes",
            Some(&token),
            Some(r#"{"title": "  ", "content": "x"}"#),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_is_visible_through_the_cache() {
    let svc = TestService::new();
    let token = svc.token_for(1, "ada");

    svc.request("POST", "/api/notes", Some(&token), Some(NOTE))
        .await;
    // Populate the cache.
    svc.request("GET", "/api/notes", Some(&token), None).await;

    let updated = svc
        .request(
            "PUT",
            "/api/notes/1",
            Some(&token),
            Some(r#"{"title": "groceries", "content": "milk, eggs, bread"}"#),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);

    let listed = svc.request("GET", "/api/notes", Some(&token), None).await;
    let json = body_json(listed).await;
    assert_eq!(json["notes"][0]["content"], "milk, eggs, bread");
}

#[tokio::test]
async fn test_delete_note() {
    let svc = TestService::new();
    let token = svc.token_for(1, "ada");

    svc.request("POST", "/api/notes", Some(&token), Some(NOTE))
        .await;
    let deleted = svc.request("DELETE", "/api/notes/1", Some(&token), None).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let json = body_json(deleted).await;
    assert_eq!(json["message"], "Note deleted successfully");

    let listed = svc.request("GET", "/api/notes", Some(&token), None).await;
    let json = body_json(listed).await;
    assert!(json["notes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let svc = TestService::new();
    let ada = svc.token_for(1, "ada");
    let bob = svc.token_for(2, "bob");

    svc.request("POST", "/api/notes", Some(&ada), Some(NOTE))
        .await;

    // Bob sees nothing.
    let listed = svc.request("GET", "/api/notes", Some(&bob), None).await;
    let json = body_json(listed).await;
    assert!(json["notes"].as_array().unwrap().is_empty());

    // Bob cannot update or delete Ada's note, and cannot tell it exists.
    let update = svc
        .request(
            "PUT",
            "/api/notes/1",
            Some(&bob),
            Some(r#"{"title": "mine now", "content": "x"}"#),
        )
        .await;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);
    let json = body_json(update).await;
    assert_eq!(json["error"], "note not found");

    let delete = svc.request("DELETE", "/api/notes/1", Some(&bob), None).await;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    // Ada's note is untouched.
    let listed = svc.request("GET", "/api/notes", Some(&ada), None).await;
    let json = body_json(listed).await;
    assert_eq!(json["notes"][0]["title"], "groceries");
}

#[tokio::test]
async fn test_foreign_token_is_rejected() {
    let svc = TestService::new();
    let token = svc.token_for(1, "ada");

    // Sanity: the fresh token works.
    let ok = svc.request("GET", "/api/notes", Some(&token), None).await;
    assert_eq!(ok.status(), StatusCode::OK);

    // A token signed with another secret does not.
    let foreign = TokenCodec::new("other-secret", Duration::from_secs(3_600))
        .issue(1, "ada", "ada@example.com")
        .unwrap();
    let rejected = svc.request("GET", "/api/notes", Some(&foreign), None).await;
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
}
