//! Route handlers for the identity service.

use axum::{
    Json,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Response},
};

use quill_api::{
    ApiError, ApiResult, LoginRequest, MeResponse, MessageResponse, RegisterRequest,
    SessionResponse,
};
use quill_auth::{SessionAuth, password, session};
use quill_core::NewUser;

use crate::state::AppState;

/// `GET /health`. Liveness only, no dependency checks.
pub async fn health() -> &'static str {
    "OK"
}

/// `POST /api/auth/register`.
///
/// Creates the user, then immediately issues a session so registration
/// doubles as the first login.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<Response> {
    let username = body.username.trim();
    let email = body.email.trim();
    if username.is_empty() || email.is_empty() || body.password.is_empty() {
        return Err(ApiError::validation(
            "username, email and password are required",
        ));
    }
    if !email.contains('@') {
        return Err(ApiError::validation("email is not valid"));
    }

    let password_hash = password::hash_password(&body.password)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

    let user_id = state
        .users
        .create_user(&NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    tracing::info!(user_id, "User registered");

    let token = state.auth.codec.issue(user_id, username, email)?;
    let cookie = session::session_cookie(
        &token,
        &state.auth.cookie,
        state.auth.codec.ttl().as_secs(),
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(SessionResponse {
            message: "User registered successfully".to_string(),
            user_id,
            username: username.to_string(),
        }),
    )
        .into_response())
}

/// `POST /api/auth/login`.
///
/// Unknown email and wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Response> {
    let Some(user) = state.users.find_by_email(body.email.trim()).await? else {
        return Err(ApiError::InvalidCredentials);
    };

    if !password::verify_password(&body.password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    tracing::info!(user_id = user.id, "User logged in");

    let token = state
        .auth
        .codec
        .issue(user.id, &user.username, &user.email)?;
    let cookie = session::session_cookie(
        &token,
        &state.auth.cookie,
        state.auth.codec.ttl().as_secs(),
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(SessionResponse {
            message: "Login successful".to_string(),
            user_id: user.id,
            username: user.username,
        }),
    )
        .into_response())
}

/// `POST /api/auth/logout`.
///
/// Replaces the session cookie with an immediately-expiring one. Succeeds
/// whether or not the request carried a session; an already-issued bearer
/// token stays valid until its own expiry.
pub async fn logout(State(state): State<AppState>) -> Response {
    let cookie = session::expired_session_cookie(&state.auth.cookie);

    (
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(MessageResponse::new("Logged out successfully")),
    )
        .into_response()
}

/// `GET /api/auth/me`.
///
/// Echoes the verified claims; nothing is re-read from the store.
pub async fn me(SessionAuth(user): SessionAuth) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        username: user.username,
        email: user.email,
    })
}
